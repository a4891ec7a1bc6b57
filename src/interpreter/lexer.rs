use std::fmt;

use logos::{Lexer, Logos, Skip};

use crate::{
    error::{LexError, lex_error::LexErrorKind},
    interpreter::value::{
        calendar::{Date, DateTime, Time},
        timedelta::{TimeUnit, Timedelta},
    },
};

/// A location in the source text.
///
/// `line` and `column` are 1-based; `offset` is the absolute byte offset
/// from the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    /// 1-based line number.
    pub line:   usize,
    /// 1-based column within the line.
    pub column: usize,
    /// Absolute byte offset from the start of the source.
    pub offset: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number and the byte offset of that line's first
/// character, so that any span can be turned into a `(line, column)` pair.
pub struct LexerExtras {
    /// The current 1-based line number.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Datetime literal tokens, such as `27.05.2020~20:30:00`.
    #[regex(r"[0-9]{2}\.[0-9]{2}\.[0-9]{4}~[0-9]{2}:[0-9]{2}:[0-9]{2}", parse_datetime)]
    Datetime(DateTime),
    /// Date literal tokens, such as `27.05.2020`.
    #[regex(r"[0-9]{2}\.[0-9]{2}\.[0-9]{4}", parse_date)]
    Date(Date),
    /// Time literal tokens, such as `20:30:00`.
    #[regex(r"[0-9]{2}:[0-9]{2}:[0-9]{2}", parse_time)]
    Time(Time),
    /// Number literal tokens, such as `42`. A leading zero is only allowed
    /// on the literal `0` itself.
    #[regex(r"0|[1-9][0-9]*", parse_number)]
    #[regex(r"0[0-9]+", leading_zero)]
    Number(i64),
    /// String literal tokens, such as `"hello"`. The only escape is `\"`.
    #[regex(r#""([^"\\\r\n]|\\")*""#, parse_string)]
    #[regex(r#""([^"\\\r\n]|\\")*"#, unterminated_string)]
    #[regex(r#""([^"\\\r\n]|\\")*\\[^"]?"#, invalid_escape)]
    String(String),
    /// Timedelta literal tokens, such as `'1Y 2M 3D'`.
    #[regex(r"'[^'\r\n]*'", parse_timedelta)]
    #[regex(r"'[^'\r\n]*", unterminated_timedelta)]
    Timedelta(Timedelta),
    /// `fun`
    #[token("fun")]
    Fun,
    /// `var`
    #[token("var")]
    Var,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `from`
    #[token("from")]
    From,
    /// `to`
    #[token("to")]
    To,
    /// `by`
    #[token("by")]
    By,
    /// `as`
    #[token("as")]
    As,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `years`
    #[token("years")]
    Years,
    /// `months`
    #[token("months")]
    Months,
    /// `weeks`
    #[token("weeks")]
    Weeks,
    /// `days`
    #[token("days")]
    Days,
    /// `hours`
    #[token("hours")]
    Hours,
    /// `minutes`
    #[token("minutes")]
    Minutes,
    /// `seconds`
    #[token("seconds")]
    Seconds,
    /// Identifier tokens; variable or function names such as `x` or `delay`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `# Comments run from one hash to the next. #`
    #[regex(r"#[^#]*#", skip_comment)]
    #[regex(r"#[^#]*", unterminated_comment)]
    Comment,
    /// Line feeds are skipped while the line counter advances.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        Skip
    })]
    Newline,
}

impl Token {
    /// The token's kind name and, for payload-carrying tokens, its payload
    /// rendered canonically. Used by the `lexer` stage output.
    #[must_use]
    pub fn describe(&self) -> (&'static str, Option<String>) {
        match self {
            Self::Number(n) => ("Number", Some(n.to_string())),
            Self::String(s) => ("String", Some(format!("{s:?}"))),
            Self::Date(d) => ("Date", Some(d.to_string())),
            Self::Time(t) => ("Time", Some(t.to_string())),
            Self::Datetime(dt) => ("Datetime", Some(dt.to_string())),
            Self::Timedelta(td) => ("Timedelta", Some(td.to_string())),
            Self::Identifier(name) => ("Identifier", Some(name.clone())),
            Self::Fun => ("Fun", None),
            Self::Var => ("Var", None),
            Self::If => ("If", None),
            Self::Else => ("Else", None),
            Self::From => ("From", None),
            Self::To => ("To", None),
            Self::By => ("By", None),
            Self::As => ("As", None),
            Self::Print => ("Print", None),
            Self::Return => ("Return", None),
            Self::Years => ("Years", None),
            Self::Months => ("Months", None),
            Self::Weeks => ("Weeks", None),
            Self::Days => ("Days", None),
            Self::Hours => ("Hours", None),
            Self::Minutes => ("Minutes", None),
            Self::Seconds => ("Seconds", None),
            Self::LParen => ("LParen", None),
            Self::RParen => ("RParen", None),
            Self::LBrace => ("LBrace", None),
            Self::RBrace => ("RBrace", None),
            Self::Comma => ("Comma", None),
            Self::Dot => ("Dot", None),
            Self::EqualEqual => ("EqualEqual", None),
            Self::Equals => ("Equals", None),
            Self::BangEqual => ("BangEqual", None),
            Self::Bang => ("Bang", None),
            Self::GreaterEqual => ("GreaterEqual", None),
            Self::Greater => ("Greater", None),
            Self::LessEqual => ("LessEqual", None),
            Self::Less => ("Less", None),
            Self::Plus => ("Plus", None),
            Self::Minus => ("Minus", None),
            Self::Star => ("Star", None),
            Self::Slash => ("Slash", None),
            Self::Ampersand => ("Ampersand", None),
            Self::Pipe => ("Pipe", None),
            Self::Comment | Self::Newline => ("Comment", None),
        }
    }

    /// Maps a time-unit keyword token to its [`TimeUnit`].
    #[must_use]
    pub const fn time_unit(&self) -> Option<TimeUnit> {
        match self {
            Self::Years => Some(TimeUnit::Years),
            Self::Months => Some(TimeUnit::Months),
            Self::Weeks => Some(TimeUnit::Weeks),
            Self::Days => Some(TimeUnit::Days),
            Self::Hours => Some(TimeUnit::Hours),
            Self::Minutes => Some(TimeUnit::Minutes),
            Self::Seconds => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

/// Folds a run of ASCII digits into an integer. Only called on slices the
/// token patterns already constrain to short digit groups.
fn digits(text: &str) -> i64 {
    text.bytes().fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
}

/// Parses a number literal, rejecting values that do not fit `i64`.
fn parse_number(lex: &mut Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::NumberTooLarge)
}

/// Rejects number literals with a leading zero, such as `0123`.
fn leading_zero(_: &mut Lexer<Token>) -> Result<i64, LexErrorKind> {
    Err(LexErrorKind::LeadingZero)
}

/// Parses and validates a `DD.MM.YYYY` date literal.
fn parse_date(lex: &mut Lexer<Token>) -> Result<Date, LexErrorKind> {
    let slice = lex.slice();
    Date::new(digits(&slice[0..2]), digits(&slice[3..5]), digits(&slice[6..10]))
        .map_err(|e| LexErrorKind::InvalidDate(e.to_string()))
}

/// Parses and validates a `HH:MM:SS` time literal.
fn parse_time(lex: &mut Lexer<Token>) -> Result<Time, LexErrorKind> {
    let slice = lex.slice();
    Time::new(digits(&slice[0..2]), digits(&slice[3..5]), digits(&slice[6..8]))
        .map_err(|e| LexErrorKind::InvalidTime(e.to_string()))
}

/// Parses and validates a `DD.MM.YYYY~HH:MM:SS` datetime literal.
fn parse_datetime(lex: &mut Lexer<Token>) -> Result<DateTime, LexErrorKind> {
    let slice = lex.slice();
    let date = Date::new(digits(&slice[0..2]), digits(&slice[3..5]), digits(&slice[6..10]))
        .map_err(|e| LexErrorKind::InvalidDate(e.to_string()))?;
    let time = Time::new(digits(&slice[11..13]), digits(&slice[14..16]), digits(&slice[17..19]))
        .map_err(|e| LexErrorKind::InvalidTime(e.to_string()))?;
    Ok(DateTime::new(date, time))
}

/// Unescapes a terminated string literal.
fn parse_string(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].replace("\\\"", "\"")
}

fn unterminated_string(_: &mut Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

fn invalid_escape(_: &mut Lexer<Token>) -> Result<String, LexErrorKind> {
    Err(LexErrorKind::InvalidEscape)
}

/// Parses the body of a terminated timedelta literal.
fn parse_timedelta(lex: &mut Lexer<Token>) -> Result<Timedelta, LexErrorKind> {
    let slice = lex.slice();
    timedelta_from_body(&slice[1..slice.len() - 1])
}

fn unterminated_timedelta(_: &mut Lexer<Token>) -> Result<Timedelta, LexErrorKind> {
    Err(LexErrorKind::UnterminatedTimedelta)
}

/// Parses the `<number><unit>` pairs between timedelta bounds.
///
/// Pairs may be separated by blanks. Units must appear in `Y M W D h m s`
/// order, each at most once, and at least one pair is required.
fn timedelta_from_body(body: &str) -> Result<Timedelta, LexErrorKind> {
    let bytes = body.as_bytes();
    let mut delta = Timedelta::ZERO;
    let mut last_unit: Option<usize> = None;
    let mut index = 0;

    while index < bytes.len() {
        let character = bytes[index] as char;
        if character == ' ' || character == '\t' {
            index += 1;
            continue;
        }
        if !character.is_ascii_digit() {
            return Err(LexErrorKind::StrayTimedeltaCharacter(character));
        }

        let start = index;
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            index += 1;
        }
        if bytes[start] == b'0' && index - start > 1 {
            return Err(LexErrorKind::LeadingZero);
        }
        let amount: i64 = body[start..index].parse()
                                            .map_err(|_| LexErrorKind::NumberTooLarge)?;

        let Some(&suffix) = bytes.get(index) else {
            return Err(LexErrorKind::MissingTimedeltaUnit);
        };
        let suffix = suffix as char;
        index += 1;
        let Some(unit) = TimeUnit::from_suffix(suffix) else {
            return Err(LexErrorKind::UnknownTimedeltaUnit(suffix));
        };
        let order = TimeUnit::ALL.iter().position(|u| *u == unit).unwrap_or_default();
        match last_unit {
            Some(previous) if order == previous => {
                return Err(LexErrorKind::RepeatedTimedeltaUnit(suffix));
            },
            Some(previous) if order < previous => {
                return Err(LexErrorKind::MisorderedTimedeltaUnit(suffix));
            },
            _ => {},
        }
        last_unit = Some(order);
        delta = delta.checked_add(Timedelta::from_unit(unit, amount))
                     .ok_or(LexErrorKind::NumberTooLarge)?;
    }

    if last_unit.is_none() {
        return Err(LexErrorKind::EmptyTimedelta);
    }
    Ok(delta)
}

/// Skips a terminated comment, keeping the line accounting correct when the
/// comment spans lines.
fn skip_comment(lex: &mut Lexer<Token>) -> Skip {
    let slice = lex.slice();
    let newlines = slice.bytes().filter(|b| *b == b'\n').count();
    if newlines > 0 {
        lex.extras.line += newlines;
        let last = slice.rfind('\n').unwrap_or_default();
        lex.extras.line_start = lex.span().start + last + 1;
    }
    Skip
}

fn unterminated_comment(_: &mut Lexer<Token>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedComment)
}

/// A token paired with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The token itself.
    pub token: Token,
    /// Where the token starts.
    pub pos:   Pos,
}

/// Pull iterator over the tokens of one source text.
///
/// Tokens are produced lazily with a one-token peek buffer; the full token
/// list is never materialized. A lexical error surfaces at the call that
/// would have produced the offending token, and the stream is not usable
/// afterwards.
pub struct TokenStream<'a> {
    lexer:  Lexer<'a, Token>,
    peeked: Option<Spanned>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { lexer:  Token::lexer(source),
               peeked: None, }
    }

    /// Position of the most recently matched span. After the stream is
    /// exhausted this is the end-of-input position.
    #[must_use]
    pub fn pos(&self) -> Pos {
        let span = self.lexer.span();
        Pos { line:   self.lexer.extras.line,
              column: span.start - self.lexer.extras.line_start + 1,
              offset: span.start, }
    }

    fn pull(&mut self) -> Result<Option<Spanned>, LexError> {
        match self.lexer.next() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some(Spanned { token,
                                                 pos: self.pos() })),
            Some(Err(kind)) => {
                let kind = match kind {
                    LexErrorKind::UnexpectedCharacter(None) => {
                        LexErrorKind::UnexpectedCharacter(self.lexer.slice().chars().next())
                    },
                    other => other,
                };
                Err(LexError { kind,
                               pos: self.pos() })
            },
        }
    }

    /// Get next token and consume it. `None` once the input is exhausted.
    ///
    /// # Errors
    /// Returns a [`LexError`] when the input cannot be processed into a
    /// token.
    pub fn next(&mut self) -> Result<Option<Spanned>, LexError> {
        if let Some(spanned) = self.peeked.take() {
            return Ok(Some(spanned));
        }
        self.pull()
    }

    /// Get next token without consuming it.
    ///
    /// # Errors
    /// Returns a [`LexError`] when the input cannot be processed into a
    /// token.
    pub fn peek(&mut self) -> Result<Option<&Spanned>, LexError> {
        if self.peeked.is_none()
           && let Some(spanned) = self.pull()?
        {
            self.peeked = Some(spanned);
        }
        Ok(self.peeked.as_ref())
    }
}

/// Renders the token stream of `source` for the `lexer` stage: one
/// `LINE:COL Kind [payload]` line per token, closed by an `End` line.
///
/// # Errors
/// Returns the first [`LexError`] in the source.
pub fn render_tokens(source: &str) -> Result<String, LexError> {
    let mut stream = TokenStream::new(source);
    let mut rendered = String::new();

    while let Some(spanned) = stream.next()? {
        let (kind, payload) = spanned.token.describe();
        rendered.push_str(&format!("{} {kind}", spanned.pos));
        if let Some(payload) = payload {
            rendered.push_str(&format!(" {payload}"));
        }
        rendered.push('\n');
    }
    rendered.push_str(&format!("{} End\n", stream.pos()));

    Ok(rendered)
}
