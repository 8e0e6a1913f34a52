//! Token-kind membership sets shared by the parser and the scanners.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::lexer::TokenKind::{self, *};

/// Kinds accepted wherever an identifier is expected.
pub static IDENTIFIER_LIKE: Lazy<HashSet<TokenKind>> = Lazy::new(|| {
    [
        Identifier, Var, Yield, Record, Sealed, Permits, When, Module, Open, Requires, Transitive, Exports,
        Opens, To, Uses, Provides, With,
    ]
    .into_iter()
    .collect()
});

/// Keywords that may appear in a modifier list.
pub static MODIFIERS: Lazy<HashSet<TokenKind>> = Lazy::new(|| {
    [
        Public, Protected, Private, Abstract, Static, Final, Native, Synchronized, Transient, Volatile, Strictfp,
        Default, Sealed, NonSealed,
    ]
    .into_iter()
    .collect()
});

pub static LITERALS: Lazy<HashSet<TokenKind>> = Lazy::new(|| {
    [
        IntLiteral, LongLiteral, FloatLiteral, DoubleLiteral, CharLiteral, StringLiteral, TextBlock, True, False,
        Null,
    ]
    .into_iter()
    .collect()
});

pub static PRIMITIVE_TYPES: Lazy<HashSet<TokenKind>> = Lazy::new(|| {
    [Boolean, Byte, Short, Int, Long, Char, Float, Double].into_iter().collect()
});

/// Kinds that can begin a unary expression other than `+`/`-`; a parenthesized
/// reference type followed by one of these is a cast.
pub static CAST_FOLLOWERS: Lazy<HashSet<TokenKind>> = Lazy::new(|| {
    let mut set: HashSet<TokenKind> = [Bang, Tilde, LParen, This, Super, New, Switch, Void, At]
        .into_iter()
        .collect();
    set.extend(IDENTIFIER_LIKE.iter().copied());
    set.extend(LITERALS.iter().copied());
    set.extend(PRIMITIVE_TYPES.iter().copied());
    set
});

#[inline]
pub fn is_identifier_like(kind: TokenKind) -> bool {
    IDENTIFIER_LIKE.contains(&kind)
}

#[inline]
pub fn is_modifier(kind: TokenKind) -> bool {
    MODIFIERS.contains(&kind)
}

#[inline]
pub fn is_primitive(kind: TokenKind) -> bool {
    PRIMITIVE_TYPES.contains(&kind)
}

#[inline]
pub fn can_follow_cast(kind: TokenKind) -> bool {
    CAST_FOLLOWERS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contextual_keywords_are_identifier_like() {
        assert!(is_identifier_like(Var));
        assert!(is_identifier_like(Record));
        assert!(is_identifier_like(To));
        assert!(!is_identifier_like(Class));
        assert!(!is_identifier_like(NonSealed));
    }

    #[test]
    fn plus_and_minus_do_not_follow_casts() {
        assert!(!can_follow_cast(Plus));
        assert!(!can_follow_cast(Minus));
        assert!(can_follow_cast(Identifier));
        assert!(can_follow_cast(IntLiteral));
        assert!(can_follow_cast(LParen));
    }
}
