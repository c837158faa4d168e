//! Line commands understood by the interactive front end.
use crate::{FilterSession, KeyValueStore, Selection, TriState};
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `+Name`
    Include(String),
    /// `-Name`
    Exclude(String),
    /// `~Name`
    Clear(String),
    /// `clear`
    ClearAll,
    /// `add Name`
    Add(String),
    /// `del Name`
    Delete(String),
    /// `restore`
    Restore,
    /// `load <expression>`, re-reads rows from a host expression.
    Load(String),
    /// `list`
    List,
    /// `json`
    Json,
    /// `commit`
    Commit,
    /// `set <expression>`, commits hand-edited text without re-parsing it.
    Set(String),
    Help,
    Unknown(String),
}

impl Command {
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if let Some(name) = line.strip_prefix('+') {
            return Some(Command::Include(name.trim().to_string()));
        }
        if let Some(name) = line.strip_prefix('-') {
            return Some(Command::Exclude(name.trim().to_string()));
        }
        if let Some(name) = line.strip_prefix('~') {
            return Some(Command::Clear(name.trim().to_string()));
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match (word, rest) {
            ("clear", "") => Command::ClearAll,
            ("add", name) if !name.is_empty() => Command::Add(name.to_string()),
            ("del", name) if !name.is_empty() => Command::Delete(name.to_string()),
            ("restore", "") => Command::Restore,
            ("load", expression) => Command::Load(expression.to_string()),
            ("list", "") => Command::List,
            ("json", "") => Command::Json,
            ("commit", "") => Command::Commit,
            ("set", text) => Command::Set(text.to_string()),
            ("help", "") | ("?", "") => Command::Help,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }

    /// Runs the command against `session`, writing user-facing output to `out`.
    ///
    /// Rejected edits are reported on `out` and leave the session unchanged;
    /// only I/O failures on `out` are returned as errors.
    pub fn execute<S: KeyValueStore>(
        &self,
        session: &mut FilterSession<S>,
        out: &mut impl Write,
    ) -> Result<()> {
        let outcome = match self {
            Command::Include(name) => session
                .toggle_category(name, Selection::Included)
                .map(|_| ())
                .map_err(|error| error.to_string()),
            Command::Exclude(name) => session
                .toggle_category(name, Selection::Excluded)
                .map(|_| ())
                .map_err(|error| error.to_string()),
            Command::Clear(name) => session
                .clear_category(name)
                .map(|_| ())
                .map_err(|error| error.to_string()),
            Command::ClearAll => {
                session.clear_all();
                Ok(())
            }
            Command::Add(name) => session
                .add_category(name)
                .map(|_| ())
                .map_err(|error| error.to_string()),
            Command::Delete(name) => {
                if !session.delete_category(name) {
                    writeln!(out, "nothing to delete for \"{name}\"")?;
                }
                Ok(())
            }
            Command::Restore => {
                session.restore_defaults();
                Ok(())
            }
            Command::Load(expression) => {
                session.refresh(expression);
                Ok(())
            }
            Command::List => {
                for row in session.rows() {
                    let marker = match row.state {
                        TriState::Included => '+',
                        TriState::Excluded => '-',
                        TriState::Neutral => ' ',
                    };
                    let origin = if row.in_catalog { "" } else { " (from filter)" };
                    writeln!(out, "[{marker}] {}{origin}", row.name)?;
                }
                return Ok(());
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(&session.snapshot())
                    .context("Failed to encode session snapshot")?;
                writeln!(out, "{json}")?;
                return Ok(());
            }
            Command::Commit => {
                writeln!(out, "{}", session.commit())?;
                return Ok(());
            }
            Command::Set(text) => {
                writeln!(out, "{}", session.commit_text(text))?;
                return Ok(());
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(());
            }
            Command::Unknown(line) => Err(format!("unknown command: {line} (try `help`)")),
        };
        match outcome {
            Ok(()) => writeln!(out, "filter: {}", session.draft())?,
            Err(notice) => writeln!(out, "{notice}")?,
        }
        Ok(())
    }
}

const HELP: &str = "\
+Name        include a category
-Name        exclude a category
~Name        clear a category
clear        clear every category
add Name     add a category to the catalog
del Name     delete a category from the catalog
restore      restore the default catalog
load EXPR    reload rows from a filter expression
list         show every category
json         show the session as JSON
commit       print the filter to apply
set EXPR     print hand-edited filter text to apply as-is
/bye         quit";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, MemoryStore};

    fn run(session: &mut FilterSession<MemoryStore>, line: &str) -> String {
        let mut out = Vec::new();
        Command::parse(line)
            .unwrap()
            .execute(session, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session() -> FilterSession<MemoryStore> {
        FilterSession::open(Catalog::open(MemoryStore::new()), "")
    }

    #[test]
    fn parses_prefix_commands() {
        assert_eq!(Command::parse("+Smoke"), Some(Command::Include("Smoke".into())));
        assert_eq!(Command::parse(" - DbApi "), Some(Command::Exclude("DbApi".into())));
        assert_eq!(Command::parse("~Smoke"), Some(Command::Clear("Smoke".into())));
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn parses_word_commands() {
        assert_eq!(Command::parse("clear"), Some(Command::ClearAll));
        assert_eq!(Command::parse("add  Nightly"), Some(Command::Add("Nightly".into())));
        assert_eq!(Command::parse("del Nightly"), Some(Command::Delete("Nightly".into())));
        assert_eq!(Command::parse("restore"), Some(Command::Restore));
        assert_eq!(
            Command::parse("load Category=Smoke&Category!=DbApi"),
            Some(Command::Load("Category=Smoke&Category!=DbApi".into()))
        );
        assert_eq!(Command::parse("load"), Some(Command::Load(String::new())));
        assert_eq!(Command::parse("add"), Some(Command::Unknown("add".into())));
        assert_eq!(Command::parse("list all"), Some(Command::Unknown("list all".into())));
    }

    #[test]
    fn edits_print_the_draft() {
        let mut session = session();
        assert_eq!(run(&mut session, "+Smoke"), "filter: Category=Smoke\n");
        assert_eq!(
            run(&mut session, "-DbApi"),
            "filter: Category=Smoke&Category!=DbApi\n"
        );
        assert_eq!(run(&mut session, "~Smoke"), "filter: Category!=DbApi\n");
        assert_eq!(run(&mut session, "clear"), "filter: \n");
    }

    #[test]
    fn rejections_print_the_notice() {
        let mut session = session();
        assert_eq!(
            run(&mut session, "add Smoke"),
            "Category \"Smoke\" already exists\n"
        );
        assert_eq!(
            run(&mut session, "del Nope"),
            "nothing to delete for \"Nope\"\nfilter: \n"
        );
        assert!(run(&mut session, "bogus").starts_with("unknown command: bogus"));
    }

    #[test]
    fn list_marks_states_and_origin() {
        let mut session = session();
        run(&mut session, "load Category=Smoke&Category!=Adhoc");
        let listing = run(&mut session, "list");
        assert!(listing.contains("[-] Adhoc (from filter)\n"));
        assert!(listing.contains("[+] Smoke\n"));
        assert!(listing.contains("[ ] DbApi\n"));
    }

    #[test]
    fn set_commits_text_without_touching_rows() {
        let mut session = session();
        run(&mut session, "+Smoke");
        assert_eq!(
            Command::parse("set  Category=Smoke|Category=Nightly "),
            Some(Command::Set("Category=Smoke|Category=Nightly".into()))
        );
        assert_eq!(
            run(&mut session, "set Category=Smoke|Category=Nightly"),
            "Category=Smoke|Category=Nightly\n"
        );
        assert!(!session.state().contains("Nightly"));
        assert_eq!(session.draft(), "Category=Smoke");
    }

    #[test]
    fn commit_prints_bare_filter() {
        let mut session = session();
        run(&mut session, "+Smoke");
        run(&mut session, "+DbApi");
        run(&mut session, "-Registration");
        assert_eq!(
            run(&mut session, "commit"),
            "(Category=DbApi|Category=Smoke)&Category!=Registration\n"
        );
    }
}
