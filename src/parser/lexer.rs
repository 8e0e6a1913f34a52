use logos::Logos;
use std::fmt;

use super::error::{ParseError, ParseResult};
use super::span::{Location, Span};

/// Token kinds for Java source.
///
/// Contextual keywords (`var`, `record`, `yield`, module words, ...) get their own
/// kinds; the parser accepts them wherever an identifier is expected.
/// Operators are lexed greedily, so `>>`, `>>>`, `>=`, `>>=` and `>>>=` may need
/// to be split again when they close generic argument lists.
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum TokenKind {
    // Keywords
    #[token("abstract")]
    Abstract,
    #[token("assert")]
    Assert,
    #[token("boolean")]
    Boolean,
    #[token("break")]
    Break,
    #[token("byte")]
    Byte,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("char")]
    Char,
    #[token("class")]
    Class,
    #[token("const")]
    Const,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("float")]
    Float,
    #[token("for")]
    For,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("instanceof")]
    InstanceOf,
    #[token("int")]
    Int,
    #[token("interface")]
    Interface,
    #[token("long")]
    Long,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("try")]
    Try,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("non-sealed")]
    NonSealed,

    // Contextual keywords
    #[token("var")]
    Var,
    #[token("yield")]
    Yield,
    #[token("record")]
    Record,
    #[token("sealed")]
    Sealed,
    #[token("permits")]
    Permits,
    #[token("when")]
    When,
    #[token("module")]
    Module,
    #[token("open")]
    Open,
    #[token("requires")]
    Requires,
    #[token("transitive")]
    Transitive,
    #[token("exports")]
    Exports,
    #[token("opens")]
    Opens,
    #[token("to")]
    To,
    #[token("uses")]
    Uses,
    #[token("provides")]
    Provides,
    #[token("with")]
    With,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    XorAssign,
    #[token("<<=")]
    LShiftAssign,
    #[token(">>=")]
    RShiftAssign,
    #[token(">>>=")]
    URShiftAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,
    #[token(">>>")]
    URShift,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    PipePipe,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("...")]
    Ellipsis,

    // Literals
    #[regex(r"[0-9][0-9_]*|0[xX][0-9a-fA-F_]+|0[bB][01_]+")]
    IntLiteral,
    #[regex(r"([0-9][0-9_]*|0[xX][0-9a-fA-F_]+|0[bB][01_]+)[lL]")]
    LongLiteral,
    #[regex(r"([0-9][0-9_]*\.[0-9_]*|\.[0-9][0-9_]*|[0-9][0-9_]*)([eE][+-]?[0-9][0-9_]*)?[fF]")]
    #[regex(r"0[xX]([0-9a-fA-F][0-9a-fA-F_]*\.?|[0-9a-fA-F_]*\.[0-9a-fA-F][0-9a-fA-F_]*)[pP][+-]?[0-9][0-9_]*[fF]")]
    FloatLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9][0-9_]*)?[dD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?[dD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*[dD]?")]
    #[regex(r"[0-9][0-9_]*[dD]")]
    #[regex(r"0[xX]([0-9a-fA-F][0-9a-fA-F_]*\.?|[0-9a-fA-F_]*\.[0-9a-fA-F][0-9a-fA-F_]*)[pP][+-]?[0-9][0-9_]*[dD]?")]
    DoubleLiteral,
    #[regex(r"'([^'\\\n]|\\u+[0-9a-fA-F]{4}|\\[0-7]{1,3}|\\.)'")]
    CharLiteral,
    #[regex(r#""([^"\\\n]|\\u+[0-9a-fA-F]{4}|\\.)*""#)]
    StringLiteral,
    #[token("\"\"\"", lex_text_block)]
    TextBlock,

    // Identifiers
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Identifier,

    // Trivia, filtered by `Lexer::tokenize`
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 2)]
    BlockComment,
    #[regex(r"[ \t\n\r\x0C]+", priority = 2)]
    Whitespace,
    #[token("\u{FEFF}")]
    Bom,

    /// End of the token stream; appended by the lexer, never matched.
    Eof,
}

fn lex_text_block(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                lex.bump(i + 3);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

impl TokenKind {
    /// Check if this token is a trivia token the parser never sees
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Bom | TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Number of `>` characters this token contributes when it closes
    /// generic argument lists (zero for everything outside the `>` family).
    pub fn angle_count(&self) -> usize {
        match self {
            TokenKind::Gt | TokenKind::Ge => 1,
            TokenKind::RShift | TokenKind::RShiftAssign => 2,
            TokenKind::URShift | TokenKind::URShiftAssign => 3,
            _ => 0,
        }
    }

    /// Kind of the operator spelled by `text`, for re-offering the remainder of a split token.
    pub fn from_angle_remainder(text: &str) -> Option<TokenKind> {
        Some(match text {
            ">" => TokenKind::Gt,
            ">>" => TokenKind::RShift,
            ">>>" => TokenKind::URShift,
            ">=" => TokenKind::Ge,
            ">>=" => TokenKind::RShiftAssign,
            ">>>=" => TokenKind::URShiftAssign,
            "=" => TokenKind::Assign,
            _ => return None,
        })
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Abstract => "'abstract'",
            Assert => "'assert'",
            Boolean => "'boolean'",
            Break => "'break'",
            Byte => "'byte'",
            Case => "'case'",
            Catch => "'catch'",
            Char => "'char'",
            Class => "'class'",
            Const => "'const'",
            Continue => "'continue'",
            Default => "'default'",
            Do => "'do'",
            Double => "'double'",
            Else => "'else'",
            Enum => "'enum'",
            Extends => "'extends'",
            Final => "'final'",
            Finally => "'finally'",
            Float => "'float'",
            For => "'for'",
            Goto => "'goto'",
            If => "'if'",
            Implements => "'implements'",
            Import => "'import'",
            InstanceOf => "'instanceof'",
            Int => "'int'",
            Interface => "'interface'",
            Long => "'long'",
            Native => "'native'",
            New => "'new'",
            Package => "'package'",
            Private => "'private'",
            Protected => "'protected'",
            Public => "'public'",
            Return => "'return'",
            Short => "'short'",
            Static => "'static'",
            Strictfp => "'strictfp'",
            Super => "'super'",
            Switch => "'switch'",
            Synchronized => "'synchronized'",
            This => "'this'",
            Throw => "'throw'",
            Throws => "'throws'",
            Transient => "'transient'",
            Try => "'try'",
            Void => "'void'",
            Volatile => "'volatile'",
            While => "'while'",
            True => "'true'",
            False => "'false'",
            Null => "'null'",
            NonSealed => "'non-sealed'",
            Var => "'var'",
            Yield => "'yield'",
            Record => "'record'",
            Sealed => "'sealed'",
            Permits => "'permits'",
            When => "'when'",
            Module => "'module'",
            Open => "'open'",
            Requires => "'requires'",
            Transitive => "'transitive'",
            Exports => "'exports'",
            Opens => "'opens'",
            To => "'to'",
            Uses => "'uses'",
            Provides => "'provides'",
            With => "'with'",
            Assign => "'='",
            AddAssign => "'+='",
            SubAssign => "'-='",
            MulAssign => "'*='",
            DivAssign => "'/='",
            ModAssign => "'%='",
            AndAssign => "'&='",
            OrAssign => "'|='",
            XorAssign => "'^='",
            LShiftAssign => "'<<='",
            RShiftAssign => "'>>='",
            URShiftAssign => "'>>>='",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            Inc => "'++'",
            Dec => "'--'",
            Bang => "'!'",
            Tilde => "'~'",
            Amp => "'&'",
            Pipe => "'|'",
            Caret => "'^'",
            LShift => "'<<'",
            RShift => "'>>'",
            URShift => "'>>>'",
            AndAnd => "'&&'",
            PipePipe => "'||'",
            Eq => "'=='",
            Ne => "'!='",
            Lt => "'<'",
            Le => "'<='",
            Gt => "'>'",
            Ge => "'>='",
            Question => "'?'",
            Colon => "':'",
            DoubleColon => "'::'",
            Arrow => "'->'",
            LParen => "'('",
            RParen => "')'",
            LBracket => "'['",
            RBracket => "']'",
            LBrace => "'{'",
            RBrace => "'}'",
            Semicolon => "';'",
            Comma => "','",
            Dot => "'.'",
            At => "'@'",
            Ellipsis => "'...'",
            IntLiteral => "int literal",
            LongLiteral => "long literal",
            FloatLiteral => "float literal",
            DoubleLiteral => "double literal",
            CharLiteral => "char literal",
            StringLiteral => "string literal",
            TextBlock => "text block",
            Identifier => "identifier",
            LineComment | BlockComment => "comment",
            Whitespace | Bom => "whitespace",
            Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Lexical token with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self { kind, lexeme: lexeme.into(), span }
    }

    /// End-of-stream marker positioned at `location`.
    pub fn eof(location: Location) -> Self {
        Self { kind: TokenKind::Eof, lexeme: String::new(), span: Span::single(location) }
    }

    /// Get the location of the first character
    pub fn location(&self) -> Location {
        self.span.start
    }

    /// Check if this token has the given kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Lexer for Java source
pub struct Lexer<'a> {
    lexer: logos::Lexer<'a, TokenKind>,
    current_line: usize,
    current_column: usize,
    current_offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: TokenKind::lexer(source),
            current_line: 1,
            current_column: 1,
            current_offset: 0,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.current_line, self.current_column, self.current_offset)
    }

    /// Get the next token, trivia included
    pub fn next_token(&mut self) -> Option<ParseResult<Token>> {
        let kind = self.lexer.next()?;
        let start = self.location();
        let lexeme = self.lexer.slice();

        match kind {
            Ok(kind) => {
                let lexeme = lexeme.to_string();
                self.update_position(&lexeme);
                Some(Ok(Token::new(kind, lexeme, Span::new(start, self.location()))))
            }
            Err(()) => {
                let shown = lexeme.chars().next().unwrap_or(' ');
                Some(Err(ParseError::Lexical {
                    message: format!("unrecognized character {:?}", shown),
                    location: start,
                }))
            }
        }
    }

    /// Update the current position based on the lexeme
    fn update_position(&mut self, lexeme: &str) {
        let mut previous = '\0';
        for ch in lexeme.chars() {
            match ch {
                '\n' => {
                    if previous != '\r' {
                        self.current_line += 1;
                    }
                    self.current_column = 1;
                }
                '\r' => {
                    self.current_line += 1;
                    self.current_column = 1;
                }
                _ => self.current_column += 1,
            }
            self.current_offset += ch.len_utf8();
            previous = ch;
        }
    }

    /// Get all significant tokens from the source, terminated by `Eof`
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(result) = self.next_token() {
            let token = result?;
            if !token.kind.is_trivia() {
                tokens.push(token);
            }
        }
        tokens.push(Token::eof(self.location()));
        log::trace!("tokenized {} tokens", tokens.len());
        Ok(tokens)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = ParseResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Tokenize `source` into the stream the parser consumes.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("Failed to tokenize")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lexer_keywords() {
        assert_eq!(
            kinds("public class Test extends Object implements Interface"),
            vec![
                TokenKind::Public,
                TokenKind::Class,
                TokenKind::Identifier,
                TokenKind::Extends,
                TokenKind::Identifier,
                TokenKind::Implements,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_contextual_keywords() {
        assert_eq!(
            kinds("record var yield sealed non-sealed permits when"),
            vec![
                TokenKind::Record,
                TokenKind::Var,
                TokenKind::Yield,
                TokenKind::Sealed,
                TokenKind::NonSealed,
                TokenKind::Permits,
                TokenKind::When,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_literals() {
        assert_eq!(
            kinds(r#"42 42L 0x1F 0b101 1.5 1.5f .5 1e10 3d 'a' '\n' "hello" true null"#),
            vec![
                TokenKind::IntLiteral,
                TokenKind::LongLiteral,
                TokenKind::IntLiteral,
                TokenKind::IntLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::FloatLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::CharLiteral,
                TokenKind::CharLiteral,
                TokenKind::StringLiteral,
                TokenKind::True,
                TokenKind::Null,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_hex_floating_point() {
        assert_eq!(
            kinds("0x1.0p3 0x1p-2f 0X.8P+1d 0xA_Fp1 0x1.fffffeP+127f 0x1F"),
            vec![
                TokenKind::DoubleLiteral,
                TokenKind::FloatLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::DoubleLiteral,
                TokenKind::FloatLiteral,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
        let tokens = tokenize("0x1.0p3;").expect("Failed to tokenize");
        assert_eq!(tokens[0].lexeme, "0x1.0p3");
    }

    #[test]
    fn test_lexer_text_block() {
        let tokens = tokenize("String s = \"\"\"\n  hi \"quoted\"\n  \"\"\";").expect("Failed to tokenize");
        assert_eq!(tokens[3].kind, TokenKind::TextBlock);
        assert!(tokens[3].lexeme.ends_with("\"\"\""));
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_lexer_shift_tokens_are_greedy() {
        assert_eq!(
            kinds("> >> >>> >= >>= >>>="),
            vec![
                TokenKind::Gt,
                TokenKind::RShift,
                TokenKind::URShift,
                TokenKind::Ge,
                TokenKind::RShiftAssign,
                TokenKind::URShiftAssign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_comments_are_skipped() {
        assert_eq!(kinds("// line\n/* block */ /** doc */"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_lexer_locations() {
        let tokens = tokenize("a\n  bb").expect("Failed to tokenize");
        assert_eq!(tokens[1].location(), Location::new(2, 3, 4));
        assert_eq!(tokens[1].span.end, Location::new(2, 5, 6));
    }

    #[test]
    fn test_lexer_reports_bad_character() {
        let err = tokenize("int # x;").unwrap_err();
        assert!(matches!(err, ParseError::Lexical { .. }));
    }
}
