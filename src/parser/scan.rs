//! Speculative scanners used to pick a production at ambiguous points.
//!
//! Every `skip_*` function advances the cursor it is given and reports whether
//! the construct was recognized; callers pass a copy of the committed cursor
//! and drop it afterwards. The `is_*_ahead` questions and the declaration
//! classifier copy the cursor themselves.

use super::cursor::TokenCursor;
use super::lexer::TokenKind::*;
use super::token_sets::{is_identifier_like, is_modifier, is_primitive};
use crate::ast::TypeDeclKind;

/// Outcome of [`classify_declaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Type(TypeDeclKind),
    Variable,
    Method,
    Constructor,
    None,
}

/// `@Name(...)` repeated, stopping before `@interface`.
pub fn skip_annotations(c: &mut TokenCursor<'_>) -> bool {
    while c.check(At) && c.kind(1) != Interface {
        if !skip_annotation(c) {
            return false;
        }
    }
    true
}

fn skip_annotation(c: &mut TokenCursor<'_>) -> bool {
    c.advance();
    if !skip_qualified_name(c) {
        return false;
    }
    if c.check(LParen) {
        return skip_parenthesized(c);
    }
    true
}

/// Modifier keywords and annotations in any order.
pub fn skip_modifiers(c: &mut TokenCursor<'_>) -> bool {
    loop {
        if is_modifier(c.kind(0)) {
            c.advance();
        } else if c.check(At) && c.kind(1) != Interface {
            if !skip_annotation(c) {
                return false;
            }
        } else {
            return true;
        }
    }
}

/// `ident(.ident)*`
pub fn skip_qualified_name(c: &mut TokenCursor<'_>) -> bool {
    if !is_identifier_like(c.kind(0)) {
        return false;
    }
    c.advance();
    while c.check(Dot) && is_identifier_like(c.kind(1)) {
        c.advance();
        c.advance();
    }
    true
}

/// A full type: annotations, base name or primitive, type arguments on any
/// segment, then array dimensions and an optional `...`.
pub fn skip_type(c: &mut TokenCursor<'_>) -> bool {
    if !skip_annotations(c) {
        return false;
    }
    let kind = c.kind(0);
    if is_primitive(kind) || kind == Void {
        c.advance();
    } else if is_identifier_like(kind) {
        c.advance();
        if c.check(Lt) && !skip_type_arguments(c) {
            return false;
        }
        while c.check(Dot) {
            let mark = c.snapshot();
            c.advance();
            if !skip_annotations(c) || !is_identifier_like(c.kind(0)) {
                c.restore(mark);
                break;
            }
            c.advance();
            if c.check(Lt) && !skip_type_arguments(c) {
                return false;
            }
        }
    } else {
        return false;
    }
    skip_dims(c);
    if c.check(Ellipsis) {
        c.advance();
    }
    true
}

/// `[]` pairs, each optionally preceded by annotations.
pub fn skip_dims(c: &mut TokenCursor<'_>) {
    loop {
        let mark = c.snapshot();
        if !skip_annotations(c) || !c.matches(&[LBracket, RBracket]) {
            c.restore(mark);
            return;
        }
        c.advance();
        c.advance();
    }
}

/// A `<...>` type argument (or type parameter) list.
///
/// Tracks nesting with a counter instead of recursing. A compound `>>`/`>>>`
/// token decrements it by its bracket count; when that would close more
/// levels than are open, only the needed brackets are consumed and the rest of
/// the lexeme is left for the caller.
pub fn skip_type_arguments(c: &mut TokenCursor<'_>) -> bool {
    if !c.check(Lt) {
        return false;
    }
    c.advance();
    let mut depth: usize = 1;
    loop {
        let kind = c.kind(0);
        match kind {
            Lt => {
                depth += 1;
                c.advance();
            }
            _ if kind.angle_count() > 0 => {
                let take = kind.angle_count().min(depth);
                if c.consume_angle_chars(take).is_err() {
                    return false;
                }
                depth -= take;
                if depth == 0 {
                    log::trace!("type arguments closed at {}", c.previous_end());
                    return true;
                }
            }
            At => {
                if !skip_annotation(c) {
                    return false;
                }
            }
            Dot | Comma | Question | Extends | Super | Amp | LBracket | RBracket => {
                c.advance();
            }
            _ if is_identifier_like(kind) || is_primitive(kind) => {
                c.advance();
            }
            _ => return false,
        }
    }
}

/// `?` with an optional `extends`/`super` bound.
pub fn skip_wildcard(c: &mut TokenCursor<'_>) -> bool {
    if !skip_annotations(c) || !c.check(Question) {
        return false;
    }
    c.advance();
    if c.check_any(&[Extends, Super]) {
        c.advance();
        return skip_type(c);
    }
    true
}

/// A balanced `( ... )` span.
pub fn skip_parenthesized(c: &mut TokenCursor<'_>) -> bool {
    if !c.check(LParen) {
        return false;
    }
    let mut depth = 0usize;
    loop {
        match c.kind(0) {
            LParen => depth += 1,
            RParen => {
                depth -= 1;
                if depth == 0 {
                    c.advance();
                    return true;
                }
            }
            Eof => return false,
            _ => {}
        }
        c.advance();
    }
}

/// `x ->` or `( ... ) ->`.
pub fn is_lambda_ahead(cursor: &TokenCursor<'_>) -> bool {
    if is_identifier_like(cursor.kind(0)) {
        return cursor.kind(1) == Arrow;
    }
    let mut c = *cursor;
    skip_parenthesized(&mut c) && c.check(Arrow)
}

/// Whether the `(` at the cursor opens a cast.
///
/// A parenthesized primitive type (with optional dimensions) always is. A
/// reference type, possibly an `&` intersection, is one only when the token
/// after `)` can start an operand other than `+`/`-`.
pub fn is_cast_ahead(cursor: &TokenCursor<'_>) -> bool {
    if !cursor.check(LParen) {
        return false;
    }
    let mut c = *cursor;
    c.advance();
    if is_primitive(c.kind(0)) {
        c.advance();
        skip_dims(&mut c);
        return c.check(RParen);
    }
    if !skip_type(&mut c) {
        return false;
    }
    while c.check(Amp) {
        c.advance();
        if !skip_type(&mut c) {
            return false;
        }
    }
    if !c.check(RParen) {
        return false;
    }
    c.advance();
    let follower = c.kind(0);
    follower != Eof && super::token_sets::can_follow_cast(follower)
}

/// Whether a type pattern or record pattern starts at the cursor.
pub fn is_pattern_ahead(cursor: &TokenCursor<'_>) -> bool {
    let mut c = *cursor;
    let had_modifiers = c.check(Final) || c.check(At);
    if !skip_modifiers(&mut c) || !skip_type(&mut c) {
        return false;
    }
    let next = c.kind(0);
    had_modifiers || next == LParen || is_identifier_like(next)
}

/// `Name<Args>(.Name<Args>)*([])*::`, e.g. `List<String>::size`.
pub fn is_generic_method_ref_ahead(cursor: &TokenCursor<'_>) -> bool {
    let mut ahead = *cursor;
    if !skip_qualified_name(&mut ahead) || !ahead.check(Lt) {
        return false;
    }
    let mut c = *cursor;
    skip_type(&mut c) && c.check(DoubleColon)
}

/// Decide what kind of declaration, if any, starts at the cursor.
///
/// Modifiers and annotations are skipped first. Records are recognized by
/// `record Name (` or `record Name <`; a bare `Name (` is a constructor.
pub fn classify_declaration(cursor: &TokenCursor<'_>) -> DeclarationKind {
    let mut c = *cursor;
    if !skip_modifiers(&mut c) {
        return DeclarationKind::None;
    }
    match c.kind(0) {
        Class => return DeclarationKind::Type(TypeDeclKind::Class),
        Interface => return DeclarationKind::Type(TypeDeclKind::Interface),
        Enum => return DeclarationKind::Type(TypeDeclKind::Enum),
        At if c.kind(1) == Interface => return DeclarationKind::Type(TypeDeclKind::Annotation),
        Record if is_identifier_like(c.kind(1)) && matches!(c.kind(2), LParen | Lt) => {
            return DeclarationKind::Type(TypeDeclKind::Record)
        }
        _ => {}
    }
    if c.check(Lt) {
        if !skip_type_arguments(&mut c) {
            return DeclarationKind::None;
        }
        if is_identifier_like(c.kind(0)) && c.kind(1) == LParen {
            return DeclarationKind::Constructor;
        }
        return if skip_type(&mut c) && is_identifier_like(c.kind(0)) && c.kind(1) == LParen {
            DeclarationKind::Method
        } else {
            DeclarationKind::None
        };
    }
    if is_identifier_like(c.kind(0)) && c.kind(1) == LParen {
        return DeclarationKind::Constructor;
    }
    if !skip_type(&mut c) || !is_identifier_like(c.kind(0)) {
        return DeclarationKind::None;
    }
    match c.kind(1) {
        LParen => DeclarationKind::Method,
        Assign | Semicolon | Comma | LBracket | Colon => DeclarationKind::Variable,
        _ => DeclarationKind::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{tokenize, Token};

    fn with_cursor<R>(source: &str, f: impl FnOnce(TokenCursor<'_>) -> R) -> R {
        let tokens: Vec<Token> = tokenize(source).unwrap();
        let cursor = TokenCursor::new(&tokens).unwrap();
        f(cursor)
    }

    #[test]
    fn type_arguments_split_double_close() {
        with_cursor("<B<C>> x", |mut c| {
            assert!(skip_type_arguments(&mut c));
            assert_eq!(c.kind(0), Identifier);
        });
    }

    #[test]
    fn type_arguments_leave_remainder_for_outer_list() {
        // Scanning only the innermost list of A<B<C<D>>> consumes one bracket.
        with_cursor("<D>>> x", |mut c| {
            assert!(skip_type_arguments(&mut c));
            assert_eq!(c.kind(0), RShift);
            assert_eq!(c.peek(0).text, ">>");
        });
    }

    #[test]
    fn type_arguments_reject_expressions() {
        with_cursor("< b + 1", |mut c| assert!(!skip_type_arguments(&mut c)));
        with_cursor("< b)", |mut c| assert!(!skip_type_arguments(&mut c)));
    }

    #[test]
    fn skip_type_handles_annotations_and_arrays() {
        with_cursor("@NonNull java.util.Map<K, List<V>> @A [] [] rest", |mut c| {
            assert!(skip_type(&mut c));
            assert_eq!(c.peek(0).text, "rest");
        });
    }

    #[test]
    fn wildcards() {
        with_cursor("? extends Comparable<T>> x", |mut c| {
            assert!(skip_wildcard(&mut c));
            assert_eq!(c.kind(0), Gt);
        });
        with_cursor("@A ? , y", |mut c| {
            assert!(skip_wildcard(&mut c));
            assert_eq!(c.kind(0), Comma);
        });
        with_cursor("T", |mut c| assert!(!skip_wildcard(&mut c)));
    }

    #[test]
    fn lambda_detection() {
        with_cursor("x -> x", |c| assert!(is_lambda_ahead(&c)));
        with_cursor("(a, b) -> a", |c| assert!(is_lambda_ahead(&c)));
        with_cursor("(a) + b", |c| assert!(!is_lambda_ahead(&c)));
    }

    #[test]
    fn cast_detection() {
        with_cursor("(int) -5", |c| assert!(is_cast_ahead(&c)));
        with_cursor("(x) - 5", |c| assert!(!is_cast_ahead(&c)));
        with_cursor("(String) obj", |c| assert!(is_cast_ahead(&c)));
        with_cursor("(Runnable & Serializable) () -> {}", |c| assert!(is_cast_ahead(&c)));
        with_cursor("(a < b)", |c| assert!(!is_cast_ahead(&c)));
    }

    #[test]
    fn generic_method_ref_detection() {
        with_cursor("List<String>::size", |c| assert!(is_generic_method_ref_ahead(&c)));
        with_cursor("a < b", |c| assert!(!is_generic_method_ref_ahead(&c)));
    }

    #[test]
    fn classifier() {
        with_cursor("private final int x = 1;", |c| assert_eq!(classify_declaration(&c), DeclarationKind::Variable));
        with_cursor("public <T> T id(T t) {}", |c| assert_eq!(classify_declaration(&c), DeclarationKind::Method));
        with_cursor("Point(int x) {}", |c| assert_eq!(classify_declaration(&c), DeclarationKind::Constructor));
        with_cursor("record Point(int x) {}", |c| {
            assert_eq!(classify_declaration(&c), DeclarationKind::Type(TypeDeclKind::Record))
        });
        with_cursor("@interface Marker {}", |c| {
            assert_eq!(classify_declaration(&c), DeclarationKind::Type(TypeDeclKind::Annotation))
        });
        with_cursor("x = 5;", |c| assert_eq!(classify_declaration(&c), DeclarationKind::None));
        with_cursor("a < b;", |c| assert_eq!(classify_declaration(&c), DeclarationKind::None));
    }
}
