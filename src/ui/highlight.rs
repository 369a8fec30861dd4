//! Line-at-a-time syntax highlighting for C source and LLVM IR
//!
//! Neither language needs a real lexer for display purposes. A line is split
//! into comments, string literals, words and single-character delimiters,
//! and each word is styled by [`Language::word_style`].

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    LlvmIr,
}

impl Language {
    fn starts_comment(self, chars: &[char], i: usize) -> bool {
        match self {
            Language::C => chars[i] == '/' && chars.get(i + 1) == Some(&'/'),
            Language::LlvmIr => chars[i] == ';',
        }
    }

    fn is_word_char(self, c: char) -> bool {
        match self {
            Language::C => c.is_alphanumeric() || c == '_',
            Language::LlvmIr => {
                c.is_alphanumeric() || matches!(c, '_' | '.' | '%' | '@' | '!' | '$' | '#')
            }
        }
    }

    fn word_style(self, word: &str, before_paren: bool) -> Style {
        if word.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            return Style::default().fg(DEFAULT_THEME.number);
        }
        match self {
            Language::C => c_word_style(word, before_paren),
            Language::LlvmIr => ir_word_style(word),
        }
    }
}

fn c_word_style(word: &str, before_paren: bool) -> Style {
    match word {
        "int" | "char" | "void" | "bool" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" | "const" | "static" => Style::default().fg(DEFAULT_THEME.type_name),
        "struct" | "return" | "if" | "else" | "while" | "for" | "do" | "switch" | "case"
        | "default" | "break" | "continue" | "goto" | "sizeof" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "NULL" => Style::default().fg(DEFAULT_THEME.number),
        _ if before_paren => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn ir_word_style(word: &str) -> Style {
    if word.starts_with('%') {
        return Style::default().fg(DEFAULT_THEME.local_value);
    }
    if word.starts_with('@') {
        return Style::default().fg(DEFAULT_THEME.global_value);
    }
    if word.starts_with('!') || word.starts_with('#') {
        return Style::default().fg(DEFAULT_THEME.metadata);
    }
    let is_int_type = word.len() > 1
        && word.starts_with('i')
        && word[1..].chars().all(|c| c.is_ascii_digit());
    if is_int_type {
        return Style::default().fg(DEFAULT_THEME.type_name);
    }
    match word {
        "void" | "ptr" | "float" | "double" | "half" | "label" | "metadata" | "x86_fp80" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        "define" | "declare" | "ret" | "br" | "switch" | "call" | "invoke" | "unreachable"
        | "phi" | "select" | "alloca" | "load" | "store" | "getelementptr" | "icmp" | "fcmp"
        | "add" | "sub" | "mul" | "sdiv" | "udiv" | "srem" | "urem" | "shl" | "lshr" | "ashr"
        | "and" | "or" | "xor" | "zext" | "sext" | "trunc" | "bitcast" | "inttoptr"
        | "ptrtoint" | "fadd" | "fsub" | "fmul" | "fdiv" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "nsw" | "nuw" | "inbounds" | "align" | "dso_local" | "noundef" | "tail" | "private"
        | "internal" | "global" | "constant" | "eq" | "ne" | "sgt" | "sge" | "slt" | "sle"
        | "ugt" | "uge" | "ult" | "ule" | "true" | "false" | "null" | "undef" | "poison" => {
            Style::default().fg(DEFAULT_THEME.function)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

fn delimiter_style(c: char) -> Style {
    match c {
        '{' | '}' | '(' | ')' | '[' | ']' | '<' | '>' => Style::default().fg(DEFAULT_THEME.primary),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Split `line` into styled spans
pub fn highlight(line: &str, language: Language) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    let flush = |word: &mut String, spans: &mut Vec<Span<'static>>, before_paren: bool| {
        if !word.is_empty() {
            let style = language.word_style(word, before_paren);
            spans.push(Span::styled(std::mem::take(word), style));
        }
    };

    while i < chars.len() {
        let c = chars[i];

        if language.starts_comment(&chars, i) {
            flush(&mut word, &mut spans, false);
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            return Line::from(spans);
        }

        if c == '"' {
            flush(&mut word, &mut spans, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            let literal: String = chars[i..end].iter().collect();
            spans.push(Span::styled(literal, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        let negative_number =
            c == '-' && word.is_empty() && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if language.is_word_char(c) || negative_number {
            word.push(c);
            i += 1;
            continue;
        }

        flush(&mut word, &mut spans, c == '(');
        spans.push(Span::styled(c.to_string(), delimiter_style(c)));
        i += 1;
    }

    flush(&mut word, &mut spans, false);
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_ir_comment_runs_to_end_of_line() {
        let line = highlight("ret i32 0 ; return zero", Language::LlvmIr);
        let last = line.spans.last().unwrap();
        assert_eq!(last.content, "; return zero");
        assert_eq!(last.style.fg, Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_ir_sigils_stay_in_word() {
        let line = highlight("%a = add i32 %x, @g", Language::LlvmIr);
        let parts = words(&line);
        assert!(parts.contains(&"%a".to_string()));
        assert!(parts.contains(&"@g".to_string()));
        assert!(parts.contains(&"i32".to_string()));
    }

    #[test]
    fn test_c_function_call_style() {
        let line = highlight("printf(\"%d\\n\", x);", Language::C);
        assert_eq!(line.spans[0].content, "printf");
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.function));
        assert_eq!(line.spans[2].content, "\"%d\\n\"");
    }

    #[test]
    fn test_text_is_preserved() {
        let source = "  store i32 -1, ptr %p, align 4 ; \"q\"";
        let line = highlight(source, Language::LlvmIr);
        assert_eq!(words(&line).concat(), source);
    }
}
