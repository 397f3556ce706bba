//! Human-readable rendering of decoded trees, for diagnostics.

use std::fmt::Write;

use crate::constants::RENDER_LINE_WIDTH;
use crate::num::number::{int_width, push_int};
use crate::node::{Node, NodeKind};
use crate::RenderOptions;

/// Renders `node` with lists as `[ a, b ]`, dicts as `{ 'k': v }` and
/// strings single-quoted. Containers that do not fit on one line are broken
/// over several.
pub fn render_debug(node: &Node<'_>) -> String {
    render_debug_with(node, &RenderOptions::default())
}

pub fn render_debug_with(node: &Node<'_>, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, node, options.single_line, 0);
    out
}

fn write_node(out: &mut String, node: &Node<'_>, single_line: bool, indent: usize) {
    match node.kind() {
        NodeKind::None => out.push_str("none"),
        NodeKind::Integer => push_int(out, node.int_value().unwrap_or_default()),
        NodeKind::String => push_string(out, node.string_value().unwrap_or_default(), single_line),
        NodeKind::List => {
            let items: Vec<Node<'_>> = node.list_items().into_iter().flatten().collect();
            let one_liner = single_line || fits_on_line(node, RENDER_LINE_WIDTH).is_some();
            out.push('[');
            write_children(out, items.len(), one_liner, indent, |out, index| {
                write_node(out, &items[index], single_line, indent + 2);
            });
            out.push(']');
        }
        NodeKind::Dict => {
            let entries: Vec<(&[u8], Node<'_>)> =
                node.dict_entries().into_iter().flatten().collect();
            let one_liner = single_line || fits_on_line(node, RENDER_LINE_WIDTH).is_some();
            out.push('{');
            write_children(out, entries.len(), one_liner, indent, |out, index| {
                let (key, value) = &entries[index];
                push_string(out, key, true);
                out.push_str(": ");
                write_node(out, value, single_line, indent + 2);
            });
            out.push('}');
        }
    }
}

fn write_children<F>(out: &mut String, len: usize, one_liner: bool, indent: usize, mut child: F)
where
    F: FnMut(&mut String, usize),
{
    if !one_liner {
        push_line_break(out, indent);
    }
    for index in 0..len {
        if index == 0 && one_liner {
            out.push(' ');
        }
        child(out, index);
        let last = index + 1 == len;
        match (one_liner, last) {
            (true, false) => out.push_str(", "),
            (true, true) => out.push(' '),
            (false, false) => {
                out.push(',');
                push_line_break(out, indent);
            }
            (false, true) => push_line_break(out, indent),
        }
    }
}

fn push_line_break(out: &mut String, indent: usize) {
    out.push('\n');
    out.push_str(&" ".repeat(indent));
}

/// Width of the one-line rendering of `node`, or `None` if it exceeds `limit`.
fn fits_on_line(node: &Node<'_>, limit: usize) -> Option<usize> {
    let mut width = 0;
    match node.kind() {
        NodeKind::None => width += 4,
        NodeKind::Integer => width += int_width(node.int_value().unwrap_or_default()) + 2,
        NodeKind::String => width += 3 + node.string_length().unwrap_or_default(),
        NodeKind::List => {
            width += 4;
            for item in node.list_items().into_iter().flatten() {
                if width > limit {
                    return None;
                }
                width += fits_on_line(&item, limit - width)? + 2;
            }
        }
        NodeKind::Dict => {
            width += 4;
            for (key, value) in node.dict_entries().into_iter().flatten() {
                width += 4 + key.len();
                if width > limit {
                    return None;
                }
                width += fits_on_line(&value, limit - width)? + 1;
            }
        }
    }
    (width <= limit).then_some(width)
}

fn push_string(out: &mut String, bytes: &[u8], single_line: bool) {
    let printable = bytes.iter().all(|&byte| is_printable(byte));
    out.push('\'');
    if printable {
        if single_line && bytes.len() > 30 {
            push_escaped(out, &bytes[..14]);
            out.push_str("...");
            push_escaped(out, &bytes[bytes.len() - 14..]);
        } else {
            push_escaped(out, bytes);
        }
    } else if single_line && bytes.len() > 20 {
        push_escaped(out, &bytes[..9]);
        out.push_str("...");
        push_escaped(out, &bytes[bytes.len() - 9..]);
    } else {
        push_escaped(out, bytes);
    }
    out.push('\'');
}

fn push_escaped(out: &mut String, bytes: &[u8]) {
    for &byte in bytes {
        if is_printable(byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
}

#[inline]
fn is_printable(byte: u8) -> bool {
    (32..127).contains(&byte)
}
