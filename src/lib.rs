use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use terminal_size::{Width, terminal_size};

pub mod editor;
pub mod error;
pub mod format;
pub mod record;
pub mod resolve;
pub mod slug;
pub mod store;

pub use error::Error;

use editor::EditorSession;
use format::{FormatContext, truncate_with_ellipsis};
use store::Store;

pub fn entry() -> Result<(), Error> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    let store = Store::open(store_dir()?)?;

    match cmd.as_str() {
        "start" | "new" => start_escalation(args, &store)?,
        "update" => update_escalation(args, &store)?,
        "show" => show_escalation(args, &store)?,
        "list" => list_escalations(&store)?,
        "search" => search_escalations(args, &store)?,
        "tag" => tag_escalation(args, &store)?,
        "delete" => delete_escalation(args, &store)?,
        "path" => println!("{}", store.dir().display()),
        "help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Escalation Tracker CLI
Usage:
  esc start <id> <title>          Start tracking an escalation (alias: new)
  esc update <id-or-index>        Add a timestamped status entry and open $EDITOR
  esc show <id-or-index>          Print a record exactly as stored
  esc list                        List records as position, id, title
  esc search <term>               Case-insensitive search across all records
  esc tag <id-or-index> <tag>...  Add tags to a record
  esc delete <id-or-index>        Delete a record (asks for confirmation)
  esc path                        Show the store directory
  esc help                        Show this message

Environment:
  ESCALATIONS_DIR                 Override store directory (default: ~/.escalations)
  EDITOR                          Editor for update sessions (default: vim)
"
    );
}

fn store_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = env::var("ESCALATIONS_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::Other,
            "HOME not set; set ESCALATIONS_DIR explicitly",
        )
    })?;
    Ok(PathBuf::from(home).join(".escalations"))
}

fn start_escalation(args: Vec<String>, store: &Store) -> Result<(), Error> {
    if args.len() < 2 {
        return Err(Error::Usage("Usage: esc start <id> <title>".into()));
    }
    let id = args[0].clone();
    let title = args[1..].join(" ");
    let path = store.create(&id, &title)?;
    println!("Created: {}", path.display());
    Ok(())
}

fn update_escalation(args: Vec<String>, store: &Store) -> Result<(), Error> {
    let token = args
        .first()
        .ok_or_else(|| Error::Usage("Usage: esc update <id-or-index>".into()))?;
    let (path, line) = store.append_update(token)?;
    println!("Updated: {}", path.display());
    EditorSession::from_env(&path, line).run()?;
    Ok(())
}

fn show_escalation(args: Vec<String>, store: &Store) -> Result<(), Error> {
    let token = args
        .first()
        .ok_or_else(|| Error::Usage("Usage: esc show <id-or-index>".into()))?;
    let (_, contents) = store.show(token)?;
    print!("{contents}");
    Ok(())
}

fn list_escalations(store: &Store) -> Result<(), Error> {
    let entries = store.list()?;
    if entries.is_empty() {
        println!("No escalations yet. Try `esc start <id> <title>`.");
        return Ok(());
    }

    let ctx = FormatContext::from_env();
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let id_width = entries
        .iter()
        .map(|e| e.id.chars().count())
        .max()
        .unwrap_or(0);

    for entry in entries {
        // Pad plain cells before coloring so escape codes do not skew the
        // columns.
        let position = ctx.format_position(&format!("{:>3}", entry.position));
        let id = ctx.format_id(&format!("{:<id_width$}", entry.id));
        let title = truncate_with_ellipsis(
            &entry.title,
            width.saturating_sub(id_width + 7),
        );
        println!("{position}  {id}  {title}");
    }
    Ok(())
}

fn search_escalations(args: Vec<String>, store: &Store) -> Result<(), Error> {
    if args.is_empty() {
        return Err(Error::Usage("Usage: esc search <term>".into()));
    }
    let term = args.join(" ");
    let ctx = FormatContext::from_env();
    for hit in store.search(&term)? {
        println!("{}  {}", ctx.format_id(&hit.id), hit.title);
        for line in &hit.lines {
            println!("  {}", ctx.highlight_match(line, Some(&term)));
        }
    }
    Ok(())
}

fn tag_escalation(args: Vec<String>, store: &Store) -> Result<(), Error> {
    if args.len() < 2 {
        return Err(Error::Usage(
            "Usage: esc tag <id-or-index> <tag>...".into(),
        ));
    }
    let token = args[0].clone();
    let tags: Vec<String> = args[1..]
        .iter()
        .flat_map(|arg| arg.split_whitespace())
        .map(str::to_string)
        .collect();
    let merged = store.tag(&token, &tags)?;

    let ctx = FormatContext::from_env();
    let rendered: Vec<String> =
        merged.iter().map(|t| ctx.format_tag(t)).collect();
    println!("Tags: {}", rendered.join(" "));
    Ok(())
}

fn delete_escalation(args: Vec<String>, store: &Store) -> Result<(), Error> {
    let token = args
        .first()
        .ok_or_else(|| Error::Usage("Usage: esc delete <id-or-index>".into()))?;
    let path = store.resolve(token)?;
    if confirm(&format!("Delete {}? [y/N] ", path.display()))? {
        store.remove(&path)?;
        println!("Deleted: {}", path.display());
    } else {
        println!("Aborted.");
    }
    Ok(())
}

/// Ask on stdout, read one line. Anything but y/Y (EOF included) declines.
fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn terminal_columns() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}
