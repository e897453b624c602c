use std::time::Duration;
use std::{env, fs, io};

use indexmap::IndexMap;
use similar::{ChangeTag, TextDiff};

use treedit::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use treedit::{CalendarDate, Drawable, RegexValue, RenderContext, TreeEditor, Value};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let value = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            Value::from_json(serde_json::from_str(&text)?)
        }
        None => sample_document(),
    };
    let before = value.to_json_pretty();

    let mut tree = TreeEditor::new("doc", value)?.with_editing(true);

    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;
    let result = event_loop(&mut terminal, &mut tree);
    terminal.move_below_frame().ok();
    terminal.exit_raw_mode()?;
    result?;

    let after = tree.value().to_json_pretty();
    println!("{after}");
    if after != before {
        println!();
        print_diff(&before, &after);
    }
    Ok(())
}

fn event_loop(terminal: &mut Terminal, tree: &mut TreeEditor) -> io::Result<()> {
    let mut render_requested = true;

    loop {
        if render_requested {
            let ctx = RenderContext::new(terminal.size()).with_focus(tree.id());
            terminal.draw(&tree.draw(&ctx).lines, None)?;
            render_requested = false;
        }

        if !terminal.poll(Duration::from_millis(100))? {
            continue;
        }
        let Some(event) = terminal.read_event()? else {
            continue;
        };
        match event {
            TerminalEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('c') => return Ok(()),
                        KeyCode::Char('e') => {
                            render_requested |= tree.set_editing(!tree.is_editing());
                            continue;
                        }
                        _ => {}
                    }
                }
                render_requested |= tree.on_key(key).request_render;
            }
            TerminalEvent::Resize(_) => render_requested = true,
        }
    }
}

fn sample_document() -> Value {
    let mut address = IndexMap::new();
    address.insert("street".to_string(), Value::Text("Langgata 7".to_string()));
    address.insert("city".to_string(), Value::Text("Oslo".to_string()));
    address.insert("zip".to_string(), Value::Text("0566".to_string()));

    let mut doc = IndexMap::new();
    doc.insert("name".to_string(), Value::Text("Ada Lovelace".to_string()));
    doc.insert("admin".to_string(), Value::Bool(true));
    doc.insert("age".to_string(), Value::Number(36.0));
    doc.insert("joined".to_string(), Value::Date(CalendarDate::today()));
    doc.insert(
        "handle_pattern".to_string(),
        Value::Regex(RegexValue::new("^@[a-z]+$", true, true, false).unwrap_or_else(|_| RegexValue::empty())),
    );
    doc.insert(
        "scores".to_string(),
        Value::List(vec![
            Value::Number(12.5),
            Value::Number(40.0),
            Value::Number(7.0),
        ]),
    );
    doc.insert("address".to_string(), Value::Object(address));
    Value::Object(doc)
}

fn print_diff(before: &str, after: &str) {
    let diff = TextDiff::from_lines(before, after);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        print!("{sign}{change}");
    }
}
