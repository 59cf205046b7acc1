//! Line-oriented command loop
//!
//! Each input line is one user action. After every action the session's
//! notice queue is drained to the output, oldest first.

use matx::{FunctionMeta, Notice, Session};
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// `gen <rows> <cols> <elements...>`
    Generate {
        rows: &'a str,
        cols: &'a str,
        elements: &'a str,
    },
    /// `id <n>`
    Identity(&'a str),
    Registers,
    Help(Option<&'a str>),
    Quit,
    Expression(&'a str),
    Empty,
}

/// First whitespace-delimited word and the trimmed rest
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(at) => (&text[..at], text[at..].trim_start()),
        None => (text, ""),
    }
}

pub fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    let (word, rest) = split_word(line);
    match word {
        "" => Command::Empty,
        "gen" => {
            let (rows, rest) = split_word(rest);
            let (cols, elements) = split_word(rest);
            Command::Generate { rows, cols, elements }
        }
        "id" => Command::Identity(rest),
        "regs" if rest.is_empty() => Command::Registers,
        "help" => Command::Help((!rest.is_empty()).then_some(rest)),
        "quit" | "exit" if rest.is_empty() => Command::Quit,
        _ => Command::Expression(line),
    }
}

/// Run until end of input or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
    format: OutputFormat,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let command = parse_command(&line);
        debug!(?command, "command");
        if command == Command::Quit {
            break;
        }
        execute(session, command, &mut out, format)?;
        drain(session, &mut out, format)?;
        out.flush()?;
    }
    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    command: Command<'_>,
    out: &mut W,
    format: OutputFormat,
) -> io::Result<()> {
    // Outcomes arrive through the notice queue
    match command {
        Command::Generate { rows, cols, elements } => {
            let _ = session.generate_matrix(rows, cols, elements);
        }
        Command::Identity(size) => {
            let _ = session.set_identity(size);
        }
        Command::Expression(expr) => {
            let _ = session.evaluate_equation(expr);
        }
        Command::Registers => write_registers(session, out, format)?,
        Command::Help(name) => write_help(session, name, out, format)?,
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}

fn drain<W: Write>(session: &mut Session, out: &mut W, format: OutputFormat) -> io::Result<()> {
    while let Some(notice) = session.next_message() {
        write_notice(&notice, out, format)?;
    }
    Ok(())
}

fn write_notice<W: Write>(notice: &Notice, out: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", notice.text),
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(notice)?),
    }
}

fn write_registers<W: Write>(session: &Session, out: &mut W, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for line in session.register_listing() {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            for (name, value) in session.registers().iter() {
                let value = value.map(matx::display_value);
                writeln!(out, "{}", json!({ "register": name.to_string(), "value": value }))?;
            }
        }
    }
    Ok(())
}

fn write_help<W: Write>(
    session: &Session,
    name: Option<&str>,
    out: &mut W,
    format: OutputFormat,
) -> io::Result<()> {
    let engine = session.engine();
    let metas: Vec<FunctionMeta> = match name {
        Some(name) => match engine.help(name) {
            Some(meta) => vec![meta],
            None => {
                writeln!(out, "Unknown function: {}", name)?;
                return Ok(());
            }
        },
        None => engine.list_functions(),
    };

    if format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string(&metas)?)?;
        return Ok(());
    }

    if name.is_none() {
        writeln!(out, "Commands: gen <rows> <cols> <elements...> [reg X], id <n>, regs, help [fn], quit")?;
        writeln!(out, "Operators: + - * / @   Functions:")?;
        for meta in &metas {
            writeln!(out, "  {:<12} {}", meta.usage, meta.description)?;
        }
        return Ok(());
    }

    for meta in &metas {
        writeln!(out, "{} - {}", meta.usage, meta.description)?;
        for arg in meta.args {
            writeln!(out, "  {} ({}): {}", arg.name, arg.typ, arg.description)?;
        }
        writeln!(out, "Returns: {}", meta.returns)?;
        for example in meta.examples {
            writeln!(out, "  {}", example)?;
        }
    }
    Ok(())
}
