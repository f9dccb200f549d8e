// Copyright (c) 2026 rezky_nightky

const SYMBOLS: &str = "+-*/%=!?#$&@()[]{}<>,;:_^~`";

fn push_range(out: &mut Vec<char>, start: char, end: char) {
    out.extend(start..=end);
}

/// The fixed glyph set streams are drawn from: digits, both letter cases and a
/// handful of punctuation.
pub fn build_glyphs() -> Vec<char> {
    let mut out = Vec::with_capacity(10 + 26 + 26 + SYMBOLS.len());
    push_range(&mut out, '0', '9');
    push_range(&mut out, 'A', 'Z');
    push_range(&mut out, 'a', 'z');
    out.extend(SYMBOLS.chars());
    out
}
