//! Commands understood by the interactive session.

use crate::error::{Error, Result};

use logos::{Lexer, Logos};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Token {
    #[regex("'([^']|'')*'", |lex| unescape(lex, '\''))]
    #[regex("\"([^\"]|\"\")*\"", |lex| unescape(lex, '"'))]
    Quoted(String),
    #[regex(r#"[^ \t\r\n\f'"]+"#, |lex| lex.slice().to_string())]
    Word(String),
}

fn unescape(lex: &Lexer<Token>, quote: char) -> String {
    let span = lex.span();
    let doubled: String = [quote, quote].iter().collect();
    lex.source()[span.start + 1..span.end - 1].replace(&doubled, &quote.to_string())
}

fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut lex = Token::lexer(line);
    let mut words = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(Token::Quoted(s)) | Ok(Token::Word(s)) => words.push(s),
            Err(_) => return Err(Error::scan(lex.slice())),
        }
    }
    Ok(words)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggles each attribute; no arguments clears them all.
    Attr(Vec<String>),
    /// Toggles each expansion; no arguments clears them all.
    Exp(Vec<String>),
    /// Sets the raw HP bounds; missing ones are cleared.
    Hp(String, String),
    Name(String),
    Apply,
    Reset,
    List,
    Select(usize),
    Close,
    Filters,
    Facets,
    Export(PathBuf),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  attr [ATTRIBUTE...]   toggle attributes (no argument clears)
  exp [EXPANSION...]    toggle expansions (no argument clears)
  hp [MIN [MAX]]        set the HP range
  name [TEXT]           set the name search
  apply                 filter with the current settings
  reset                 clear every filter
  list                  show the current results again
  select N              show the details of result N
  close                 close the details
  filters               show the current filter settings
  facets                show the available attributes and expansions
  export PATH           write the current results as JSON
  help                  show this help
  quit                  leave";

impl Command {
    /// Parses one input line. Blank lines are `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = tokenize(line)?.into_iter();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<String> = words.collect();
        let command = match head.to_lowercase().as_str() {
            "attr" | "attribute" => Command::Attr(args),
            "exp" | "expansion" => Command::Exp(args),
            "hp" => {
                if args.len() > 2 {
                    return Err(Error::syntax("usage: hp [MIN [MAX]]"));
                }
                let mut args = args.into_iter();
                Command::Hp(args.next().unwrap_or_default(), args.next().unwrap_or_default())
            }
            "name" => Command::Name(args.join(" ")),
            "apply" => no_args(Command::Apply, &head, &args)?,
            "reset" => no_args(Command::Reset, &head, &args)?,
            "list" | "ls" => no_args(Command::List, &head, &args)?,
            "select" | "show" => match args.as_slice() {
                [n] => n
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .map(Command::Select)
                    .ok_or_else(|| Error::syntax(format!("not a result number: {n}")))?,
                _ => return Err(Error::syntax("usage: select N")),
            },
            "close" => no_args(Command::Close, &head, &args)?,
            "filters" => no_args(Command::Filters, &head, &args)?,
            "facets" => no_args(Command::Facets, &head, &args)?,
            "export" => match args.as_slice() {
                [path] => Command::Export(PathBuf::from(path)),
                _ => return Err(Error::syntax("usage: export PATH")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(Error::syntax(format!("unknown command `{other}`, try `help`"))),
        };
        Ok(Some(command))
    }
}

fn no_args(command: Command, head: &str, args: &[String]) -> Result<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(Error::syntax(format!("`{head}` takes no arguments")))
    }
}
