use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::{
    doc_id::DocumentId,
    document::Document,
    error::Result,
    search,
    store::DocumentStore,
    suggest,
    tokenizer::tokenize,
    walker,
};

/// How command responses are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    /// One JSON document per response line.
    Json,
}

/// A parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Add(Vec<String>),
    Remove(Vec<String>),
    Suggest { limit: usize, query: String },
    List,
    Exit,
    Unknown,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// The verb is case-insensitive; everything after it is kept as typed.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            ":search" => Self::Search(rest.to_string()),
            ":add" => Self::Add(split_names(rest)),
            ":rm" => Self::Remove(split_names(rest)),
            ":suggest" => parse_suggest(rest).unwrap_or(Self::Unknown),
            ":list" => Self::List,
            ":exit" | ":quit" => Self::Exit,
            _ => Self::Unknown,
        };
        Some(command)
    }
}

fn split_names(rest: &str) -> Vec<String> {
    rest.split_whitespace().map(str::to_string).collect()
}

fn parse_suggest(rest: &str) -> Option<Command> {
    let (count, query) =
        rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Command::Suggest {
        limit: count.parse().ok()?,
        query: query.trim().to_string(),
    })
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Serialize)]
struct ListedDocument {
    name: String,
    id: DocumentId,
}

/// The interactive command loop over one store.
#[derive(Debug)]
pub struct Shell<'a> {
    store: &'a DocumentStore,
    format: OutputFormat,
    search_limit: usize,
}

impl<'a> Shell<'a> {
    pub fn new(store: &'a DocumentStore, format: OutputFormat) -> Self {
        Self {
            store,
            format,
            search_limit: search::DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Print the startup banner. Silent in JSON mode.
    pub fn banner(&self, out: &mut impl Write) -> Result<()> {
        if self.format == OutputFormat::Json {
            return Ok(());
        }
        writeln!(
            out,
            "Welcome to SimpleSearch, Exit with ctrl-c or type ':exit' or \
             ':quit'."
        )?;
        writeln!(
            out,
            "{} file(s) read in directory {}",
            self.store.len(),
            self.store.root().display()
        )?;
        Ok(())
    }

    /// Read commands from `input` until `:exit`, `:quit` or end of input.
    pub fn run(&self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.prompt(out)?;
        for line in input.lines() {
            if let Some(command) = Command::parse(&line?)
                && self.execute(&command, out)? == Flow::Exit
            {
                return Ok(());
            }
            self.prompt(out)?;
        }
        Ok(())
    }

    fn prompt(&self, out: &mut impl Write) -> Result<()> {
        if self.format == OutputFormat::Human {
            write!(out, "> ")?;
            out.flush()?;
        }
        Ok(())
    }

    pub fn execute(
        &self,
        command: &Command,
        out: &mut impl Write,
    ) -> Result<Flow> {
        match command {
            Command::Search(text) => {
                let keywords = tokenize(text);
                let results =
                    search::search(self.store, &keywords, self.search_limit);
                match self.format {
                    OutputFormat::Human => search::write_human(out, &results)?,
                    OutputFormat::Json => {
                        search::write_json(out, text, &results)?
                    }
                }
            }
            Command::Add(names) => {
                for name in self.existing(names) {
                    self.store.add(Document::new(name));
                }
                self.store.load_all();
            }
            Command::Remove(names) => {
                for name in self.existing(names) {
                    self.store.remove(DocumentId::new(name));
                }
                self.store.load_all();
            }
            Command::Suggest { limit, query } => {
                let suggestions = suggest::suggest(self.store, query, *limit);
                match self.format {
                    OutputFormat::Human => {
                        suggest::write_human(out, &suggestions)?
                    }
                    OutputFormat::Json => {
                        suggest::write_json(out, &suggestions)?
                    }
                }
            }
            Command::List => self.list(out)?,
            Command::Exit => {
                if self.format == OutputFormat::Human {
                    writeln!(out, "  - bye!")?;
                }
                return Ok(Flow::Exit);
            }
            Command::Unknown => match self.format {
                OutputFormat::Human => writeln!(out, "  - unknown command")?,
                OutputFormat::Json => {
                    let response = serde_json::json!({
                        "error": "unknown command"
                    });
                    serde_json::to_writer(&mut *out, &response)
                        .map_err(std::io::Error::from)?;
                    writeln!(out)?;
                }
            },
        }
        Ok(Flow::Continue)
    }

    /// Names from `names` that exist as files under the root.
    fn existing<'n>(
        &self,
        names: &'n [String],
    ) -> impl Iterator<Item = &'n str> {
        let root = self.store.root();
        names.iter().map(String::as_str).filter(move |name| {
            let found = walker::file_exists(root, name);
            if !found {
                debug!(name = *name, "skipping missing file");
            }
            found
        })
    }

    fn list(&self, out: &mut impl Write) -> Result<()> {
        let names = self.store.names();
        match self.format {
            OutputFormat::Human if names.is_empty() => {
                writeln!(out, "   no documents indexed")?;
            }
            OutputFormat::Human => {
                for (name, id) in &names {
                    writeln!(out, "   - {name} {id}")?;
                }
            }
            OutputFormat::Json => {
                let listed: Vec<_> = names
                    .into_iter()
                    .map(|(name, id)| ListedDocument { name, id })
                    .collect();
                serde_json::to_writer(&mut *out, &listed)
                    .map_err(std::io::Error::from)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_store() -> (tempfile::TempDir, DocumentStore) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "apple banana").unwrap();
        std::fs::write(tmp.path().join("b.txt"), "banana cherry").unwrap();
        let store = DocumentStore::open(tmp.path(), 2).unwrap();
        store.seed().unwrap();
        store.load_all();
        (tmp, store)
    }

    fn run_lines(shell: &Shell<'_>, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            if let Some(command) = Command::parse(line) {
                shell.execute(&command, &mut out).unwrap();
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_verbs() {
        assert_eq!(
            Command::parse(":search Apple pie"),
            Some(Command::Search("Apple pie".into()))
        );
        assert_eq!(
            Command::parse(":ADD a.txt  B.txt"),
            Some(Command::Add(vec!["a.txt".into(), "B.txt".into()]))
        );
        assert_eq!(
            Command::parse(":rm a.txt"),
            Some(Command::Remove(vec!["a.txt".into()]))
        );
        assert_eq!(
            Command::parse(":suggest 5 banana split"),
            Some(Command::Suggest {
                limit: 5,
                query: "banana split".into()
            })
        );
        assert_eq!(Command::parse(":list"), Some(Command::List));
        assert_eq!(Command::parse(":exit"), Some(Command::Exit));
        assert_eq!(Command::parse(":quit"), Some(Command::Exit));
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(Command::parse("hello"), Some(Command::Unknown));
        assert_eq!(Command::parse(":suggest x banana"), Some(Command::Unknown));
        assert_eq!(
            Command::parse(":suggest -3 banana"),
            Some(Command::Unknown)
        );
        assert_eq!(Command::parse(":suggest"), Some(Command::Unknown));
        assert_eq!(Command::parse(":searching foo"), Some(Command::Unknown));
    }

    #[test]
    fn search_renders_scores() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);

        assert_eq!(
            run_lines(&shell, &[":search apple banana"]),
            "   - a.txt : 100%\n   - b.txt : 50%\n"
        );
        assert_eq!(
            run_lines(&shell, &[":search durian"]),
            "   no matches found\n"
        );
    }

    #[test]
    fn search_limit_is_configurable() {
        let (_tmp, store) = fruit_store();
        let shell =
            Shell::new(&store, OutputFormat::Human).with_search_limit(1);

        assert_eq!(
            run_lines(&shell, &[":search banana"]),
            "   - a.txt : 100%\n"
        );
    }

    #[test]
    fn suggest_renders_pairs() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);

        assert_eq!(
            run_lines(&shell, &[":suggest 5 banana"]),
            "   - 'banana' apple\n   - 'banana' cherry\n"
        );
    }

    #[test]
    fn add_and_remove() {
        let (tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);

        assert_eq!(
            run_lines(&shell, &[":rm a.txt", ":search apple"]),
            "   no matches found\n"
        );
        assert_eq!(store.len(), 1);

        std::fs::write(tmp.path().join("c.txt"), "apple durian").unwrap();
        assert_eq!(
            run_lines(
                &shell,
                &[":add a.txt c.txt missing.txt", ":search apple"]
            ),
            "   - a.txt : 100%\n   - c.txt : 100%\n"
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_ignores_paths_outside_root() {
        let (_tmp, store) = fruit_store();
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        std::fs::write(&secret, "topsecret").unwrap();
        let shell = Shell::new(&store, OutputFormat::Human);

        let add_absolute = format!(":add {}", secret.display());
        assert_eq!(
            run_lines(
                &shell,
                &[
                    add_absolute.as_str(),
                    ":add ../secret.txt",
                    ":search topsecret",
                ]
            ),
            "   no matches found\n"
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_requires_file_on_disk() {
        let (tmp, store) = fruit_store();
        std::fs::remove_file(tmp.path().join("a.txt")).unwrap();
        let shell = Shell::new(&store, OutputFormat::Human);

        run_lines(&shell, &[":rm a.txt"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_documents() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);

        let a = DocumentId::new("a.txt");
        let b = DocumentId::new("b.txt");
        assert_eq!(
            run_lines(&shell, &[":list"]),
            format!("   - a.txt {a}\n   - b.txt {b}\n")
        );

        run_lines(&shell, &[":rm a.txt b.txt"]);
        assert_eq!(run_lines(&shell, &[":list"]), "   no documents indexed\n");
    }

    #[test]
    fn unknown_and_exit() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);
        let mut out = Vec::new();

        assert_eq!(
            shell.execute(&Command::Unknown, &mut out).unwrap(),
            Flow::Continue
        );
        assert_eq!(
            shell.execute(&Command::Exit, &mut out).unwrap(),
            Flow::Exit
        );
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  - unknown command\n  - bye!\n"
        );
    }

    #[test]
    fn run_stops_at_exit() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Human);
        let input = ":search cherry\n\n:exit\n:search apple\n";
        let mut out = Vec::new();

        shell.run(input.as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">    - b.txt : 100%\n> >   - bye!\n"
        );
    }

    #[test]
    fn run_ends_at_eof() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Json);
        let mut out = Vec::new();

        shell.run(":suggest 1 banana\n".as_bytes(), &mut out).unwrap();
        let value: serde_json::Value =
            serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["word"], "apple");
    }

    #[test]
    fn banner_counts_documents() {
        let (tmp, store) = fruit_store();
        let mut out = Vec::new();
        Shell::new(&store, OutputFormat::Human).banner(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Welcome to SimpleSearch"));
        assert!(text.contains(&format!(
            "2 file(s) read in directory {}",
            tmp.path().display()
        )));
    }

    #[test]
    fn json_mode_is_line_oriented() {
        let (_tmp, store) = fruit_store();
        let shell = Shell::new(&store, OutputFormat::Json);

        let out = run_lines(&shell, &[":search banana", ":list", "bogus"]);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["result_count"], 2);
        assert_eq!(lines[1][1]["name"], "b.txt");
        assert_eq!(lines[2]["error"], "unknown command");
    }
}
