// Parser for the Mermaid graph subset accepted by mmc.
//
// Walks the token stream line by line and extracts node declarations
// (`id[descriptor]`, optionally with a trailing `(payload)`) and directed
// edges (`src --> dst`). The grammar is forgiving: a line that yields
// nothing is at worst a warning, never a failure.
//
// Preconditions: none — any text is accepted.
// Postconditions: returns a RawGraph plus any parse warnings, in line order.
// Failure modes: none. Malformed lines produce `W0100` warnings.
// Side effects: none.

use crate::ast::RawGraph;
use crate::diag::{codes, Diagnostic};
use crate::lexer::{lex, Span, Token};

/// Result of parsing: the raw graph plus any warnings.
#[derive(Debug)]
pub struct ParseResult {
    pub graph: RawGraph,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse Mermaid graph text into a RawGraph. Lexes then parses.
pub fn parse(source: &str) -> ParseResult {
    let tokens = lex(source);
    let mut graph = RawGraph::new();
    let mut diagnostics = Vec::new();

    for line in tokens.split(|(tok, _)| *tok == Token::Newline) {
        parse_line(source, line, &mut graph, &mut diagnostics);
    }

    ParseResult { graph, diagnostics }
}

// ── Line grammar ────────────────────────────────────────────────────────────

/// Orientation headers that introduce a Mermaid graph. A line whose first
/// token is one of these is ignored wholesale.
const HEADER_KEYWORDS: &[&str] = &["graph", "flowchart"];

fn parse_line(
    source: &str,
    line: &[(Token, Span)],
    graph: &mut RawGraph,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some((first, first_span)) = line.first() else {
        return; // blank line
    };
    if *first == Token::Ident && HEADER_KEYWORDS.contains(&&source[first_span.start..first_span.end])
    {
        return;
    }

    // Pass 1: every `id[descriptor]` adjacency declares (or redeclares) a
    // node. A `(payload)` group directly after the brackets is folded into
    // the descriptor text so the resolver sees one string either way.
    let mut declared = 0usize;
    let mut i = 0;
    while i < line.len() {
        if let [(Token::Ident, id_span), (Token::Descriptor(descriptor), desc_span), rest @ ..] =
            &line[i..]
        {
            // The brackets must touch the id, as in `A[Constant]` — a gap
            // means the bracket group belongs to nothing.
            if desc_span.start == id_span.end {
                let id = &source[id_span.start..id_span.end];
                let mut descriptor = descriptor.clone();
                let mut end_span = *desc_span;
                if let Some((Token::Payload(payload), pay_span)) = rest.first() {
                    descriptor.push('(');
                    descriptor.push_str(payload);
                    descriptor.push(')');
                    end_span = *pay_span;
                    i += 1;
                }
                graph.declare(id, descriptor, id_span.join(end_span));
                declared += 1;
                i += 2;
                continue;
            }
        }
        i += 1;
    }

    // Pass 2: split at the first arrow; the leading token of each side must
    // be an identifier for the edge to count.
    let mut edge_added = false;
    if let Some(arrow_pos) = line.iter().position(|(tok, _)| *tok == Token::Arrow) {
        let left = leading_ident(source, &line[..arrow_pos]);
        let right = leading_ident(source, &line[arrow_pos + 1..]);
        if let (Some(src), Some(dst)) = (left, right) {
            graph.add_edge(src, dst, line_span(line));
            edge_added = true;
        }
    }

    // A line that contains identifiers but produced nothing is malformed.
    // Lines with no identifier at all (pure decoration) stay silent.
    let had_ident = line.iter().any(|(tok, _)| *tok == Token::Ident);
    if declared == 0 && !edge_added && had_ident {
        diagnostics.push(
            Diagnostic::warning(
                codes::PARSE_LINE,
                line_span(line),
                format!(
                    "line `{}` yielded no node or edge",
                    snippet(source, line_span(line))
                ),
            )
            .with_hint("expected `id[Kind]` declarations or a `src --> dst` edge"),
        );
    }
}

/// First token of a segment, if it is an identifier. Junk ahead of the
/// identifier disqualifies the segment, matching the strict "leading token"
/// rule of the grammar.
fn leading_ident<'s>(source: &'s str, segment: &[(Token, Span)]) -> Option<&'s str> {
    match segment.first() {
        Some((Token::Ident, span)) => Some(&source[span.start..span.end]),
        _ => None,
    }
}

fn line_span(line: &[(Token, Span)]) -> Span {
    match (line.first(), line.last()) {
        (Some((_, first)), Some((_, last))) => first.join(*last),
        _ => Span { start: 0, end: 0 },
    }
}

fn snippet(source: &str, span: Span) -> &str {
    source[span.start..span.end].trim()
}
