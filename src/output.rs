//! Output formatting for parsed queries, token dumps, and term spans

use crate::analysis::Token;
use crate::query::{Query, QueryNode};
use crate::term::segment::{Span, SpanKind};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

fn choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print a parsed query as an indented tree
pub fn print_query(query: &Query, color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice(color));
    print_node(&mut stdout, &query.root, 0)
}

fn print_node(stdout: &mut StandardStream, node: &QueryNode, depth: usize) -> io::Result<()> {
    write!(stdout, "{}", "  ".repeat(depth))?;

    match node {
        QueryNode::Term { field, text } => {
            print_label(stdout, "term")?;
            print_field(stdout, field)?;
            print_payload(stdout, text)?;
        }
        QueryNode::Phrase { field, terms } => {
            print_label(stdout, "phrase")?;
            print_field(stdout, field)?;
            print_payload(stdout, &format!("\"{}\"", terms.join(" ")))?;
        }
        QueryNode::Prefix { field, text } => {
            print_label(stdout, "prefix")?;
            print_field(stdout, field)?;
            print_payload(stdout, &format!("{text}*"))?;
        }
        QueryNode::Wildcard { field, pattern } => {
            print_label(stdout, "wildcard")?;
            print_field(stdout, field)?;
            print_payload(stdout, pattern)?;
        }
        QueryNode::Fuzzy {
            field,
            text,
            similarity,
        } => {
            print_label(stdout, "fuzzy")?;
            print_field(stdout, field)?;
            print_payload(stdout, &format!("{text}~{similarity}"))?;
        }
        QueryNode::Range {
            field,
            lower,
            upper,
            inclusive,
        } => {
            print_label(stdout, "range")?;
            print_field(stdout, field)?;
            let (open, close) = if *inclusive { ('[', ']') } else { ('{', '}') };
            let lower = lower.as_deref().unwrap_or("*");
            let upper = upper.as_deref().unwrap_or("*");
            print_payload(stdout, &format!("{open}{lower} TO {upper}{close}"))?;
        }
        QueryNode::And(nodes) => {
            print_label(stdout, "AND")?;
            writeln!(stdout)?;
            for child in nodes {
                print_node(stdout, child, depth + 1)?;
            }
            return Ok(());
        }
        QueryNode::Or(nodes) => {
            print_label(stdout, "OR")?;
            writeln!(stdout)?;
            for child in nodes {
                print_node(stdout, child, depth + 1)?;
            }
            return Ok(());
        }
        QueryNode::Not(inner) => {
            print_label(stdout, "NOT")?;
            writeln!(stdout)?;
            return print_node(stdout, inner, depth + 1);
        }
        QueryNode::Empty => {
            print_label(stdout, "empty")?;
        }
    }

    writeln!(stdout)?;
    Ok(())
}

fn print_label(stdout: &mut StandardStream, label: &str) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(stdout, "{label}")?;
    stdout.reset()?;
    Ok(())
}

fn print_field(stdout: &mut StandardStream, field: &str) -> io::Result<()> {
    write!(stdout, " ")?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
    write!(stdout, "{field}")?;
    stdout.reset()?;
    write!(stdout, ":")?;
    Ok(())
}

fn print_payload(stdout: &mut StandardStream, payload: &str) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(stdout, "{payload}")?;
    stdout.reset()?;
    Ok(())
}

/// Print analyzer output, one token per line
pub fn print_tokens(tokens: &[Token], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice(color));

    if tokens.is_empty() {
        writeln!(stdout, "(no tokens)")?;
        return Ok(());
    }

    for token in tokens {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", token.position)?;
        stdout.reset()?;
        write!(stdout, ": ")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stdout, "{}", token.text)?;
        stdout.reset()?;
        writeln!(stdout, " [{}..{}]", token.start, token.end)?;
    }

    Ok(())
}

/// Print how a term splits into spans, one span per line
pub fn print_spans(spans: &[Span<'_>], color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice(color));

    if spans.is_empty() {
        writeln!(stdout, "(empty term)")?;
        return Ok(());
    }

    for span in spans {
        let (label, fg) = match span.kind {
            SpanKind::Literal => ("literal ", Color::Cyan),
            SpanKind::Wildcard => ("wildcard", Color::Yellow),
            SpanKind::Escaped => ("escaped ", Color::Magenta),
        };
        stdout.set_color(ColorSpec::new().set_fg(Some(fg)))?;
        write!(stdout, "{label}")?;
        stdout.reset()?;
        write!(stdout, " [{}..{}] ", span.start, span.end)?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stdout, "{}", span.text)?;
        stdout.reset()?;
    }

    Ok(())
}
