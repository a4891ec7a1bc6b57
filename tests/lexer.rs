use timon::{
    interpreter::{
        lexer::{Token, TokenStream},
        value::{
            calendar::{Date, Time},
            timedelta::Timedelta,
        },
    },
    lex_source,
};

fn tokens(source: &str) -> Vec<Token> {
    let mut stream = TokenStream::new(source);
    let mut collected = Vec::new();
    loop {
        match stream.next() {
            Ok(Some(spanned)) => collected.push(spanned.token),
            Ok(None) => return collected,
            Err(e) => panic!("unexpected lex error: {e}\nSource:\n{source}"),
        }
    }
}

fn lex_error(source: &str) -> String {
    let mut stream = TokenStream::new(source);
    loop {
        match stream.next() {
            Ok(Some(_)) => {},
            Ok(None) => panic!("lexing succeeded but was expected to fail:\n{source}"),
            Err(e) => return e.to_string(),
        }
    }
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(tokens("fun var if else from to by as print return"),
               vec![Token::Fun,
                    Token::Var,
                    Token::If,
                    Token::Else,
                    Token::From,
                    Token::To,
                    Token::By,
                    Token::As,
                    Token::Print,
                    Token::Return]);
    assert_eq!(tokens("years months weeks days hours minutes seconds"),
               vec![Token::Years,
                    Token::Months,
                    Token::Weeks,
                    Token::Days,
                    Token::Hours,
                    Token::Minutes,
                    Token::Seconds]);
    assert_eq!(tokens("x _tmp day2 funny"),
               vec![Token::Identifier("x".into()),
                    Token::Identifier("_tmp".into()),
                    Token::Identifier("day2".into()),
                    Token::Identifier("funny".into())]);
}

#[test]
fn operators_longest_match_first() {
    assert_eq!(tokens("== = != ! >= > <= <"),
               vec![Token::EqualEqual,
                    Token::Equals,
                    Token::BangEqual,
                    Token::Bang,
                    Token::GreaterEqual,
                    Token::Greater,
                    Token::LessEqual,
                    Token::Less]);
    assert_eq!(tokens("a<=b"),
               vec![Token::Identifier("a".into()),
                    Token::LessEqual,
                    Token::Identifier("b".into())]);
}

#[test]
fn number_literals() {
    assert_eq!(tokens("0 7 42 9223372036854775807"),
               vec![Token::Number(0),
                    Token::Number(7),
                    Token::Number(42),
                    Token::Number(i64::MAX)]);
}

#[test]
fn temporal_literals() {
    assert_eq!(tokens("27.05.2020"),
               vec![Token::Date(Date::new(27, 5, 2020).unwrap())]);
    assert_eq!(tokens("20:37:35"), vec![Token::Time(Time::new(20, 37, 35).unwrap())]);
    let spanned = &tokens("10.04.2018~10:57:00")[0];
    match spanned {
        Token::Datetime(dt) => {
            assert_eq!(dt.date(), Date::new(10, 4, 2018).unwrap());
            assert_eq!(dt.time(), Time::new(10, 57, 0).unwrap());
        },
        other => panic!("expected a datetime token, found {other:?}"),
    }
}

#[test]
fn a_date_followed_by_an_access_keeps_both_tokens() {
    assert_eq!(tokens("27.05.2020.days"),
               vec![Token::Date(Date::new(27, 5, 2020).unwrap()),
                    Token::Dot,
                    Token::Days]);
}

#[test]
fn timedelta_literals() {
    assert_eq!(tokens("'10W 10D'"),
               vec![Token::Timedelta(Timedelta { weeks: 10,
                                                 days: 10,
                                                 ..Timedelta::ZERO })]);
    assert_eq!(tokens("'1Y2M3W4D5h6m7s'"),
               vec![Token::Timedelta(Timedelta { years:   1,
                                                 months:  2,
                                                 weeks:   3,
                                                 days:    4,
                                                 hours:   5,
                                                 minutes: 6,
                                                 seconds: 7, })]);
    assert_eq!(tokens("'7s'"),
               vec![Token::Timedelta(Timedelta { seconds: 7,
                                                 ..Timedelta::ZERO })]);
}

#[test]
fn string_literals() {
    assert_eq!(tokens(r#""we have time""#),
               vec![Token::String("we have time".into())]);
    assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::String("say \"hi\"".into())]);
    assert_eq!(tokens(r#""""#), vec![Token::String(String::new())]);
}

#[test]
fn comments_and_whitespace_are_swallowed() {
    assert_eq!(tokens("print # comment # 1"), vec![Token::Print, Token::Number(1)]);
    assert_eq!(tokens("# a # 1 # b #"), vec![Token::Number(1)]);
    assert_eq!(tokens("\t \r\n  1"), vec![Token::Number(1)]);
}

#[test]
fn positions_track_lines_and_columns() {
    let mut stream = TokenStream::new("var x\n  x = 1\n");

    let spanned = stream.next().unwrap().unwrap();
    assert_eq!(spanned.token, Token::Var);
    assert_eq!((spanned.pos.line, spanned.pos.column, spanned.pos.offset), (1, 1, 0));

    let spanned = stream.next().unwrap().unwrap();
    assert_eq!(spanned.token, Token::Identifier("x".into()));
    assert_eq!((spanned.pos.line, spanned.pos.column, spanned.pos.offset), (1, 5, 4));

    let spanned = stream.next().unwrap().unwrap();
    assert_eq!((spanned.pos.line, spanned.pos.column, spanned.pos.offset), (2, 3, 8));
}

#[test]
fn positions_are_monotonic() {
    let source = "fun f(x){ return x * 2 }\nprint f(21) # done #\n";
    let mut stream = TokenStream::new(source);
    let mut previous = 0;
    while let Some(spanned) = stream.next().unwrap() {
        assert!(spanned.pos.offset >= previous);
        previous = spanned.pos.offset;
    }
}

#[test]
fn multi_line_comment_advances_the_line_counter() {
    let mut stream = TokenStream::new("# one\ntwo\nthree # x");
    let spanned = stream.next().unwrap().unwrap();
    assert_eq!(spanned.token, Token::Identifier("x".into()));
    assert_eq!((spanned.pos.line, spanned.pos.column), (3, 9));
}

#[test]
fn lex_error_positions() {
    assert_eq!(lex_error("print $"), "LexError at 1:7: unexpected character '$'");
    assert_eq!(lex_error("var x = 099"),
               "LexError at 1:9: number literals cannot start with a leading zero");
    assert!(lex_error("\n\n  \"open").starts_with("LexError at 3:3:"));
}

#[test]
fn literal_lex_errors() {
    assert!(lex_error("32.01.2020").contains("invalid date"));
    assert!(lex_error("01.13.2020").contains("invalid date"));
    assert!(lex_error("29.02.2019").contains("invalid date"));
    assert!(lex_error("00.01.2020").contains("invalid date"));
    assert!(lex_error("01.01.0000").contains("invalid date"));
    assert!(lex_error("24:00:00").contains("invalid time"));
    assert!(lex_error("10:60:00").contains("invalid time"));
    assert!(lex_error("10:00:60").contains("invalid time"));
    assert!(lex_error("99999999999999999999").contains("too large"));
}

#[test]
fn string_lex_errors() {
    assert!(lex_error("\"open").contains("closing"));
    assert!(lex_error("\"line\nbreak\"").contains("closing"));
    assert!(lex_error(r#""bad \n escape""#).contains("escape"));
}

#[test]
fn timedelta_lex_errors() {
    assert!(lex_error("'1D").contains("closing"));
    assert!(lex_error("''").contains("at least one"));
    assert!(lex_error("'1D 2D'").contains("twice"));
    assert!(lex_error("'1M 1Y'").contains("out of order"));
    assert!(lex_error("'1x'").contains("unknown timedelta unit"));
    assert!(lex_error("'D'").contains("unexpected character"));
    assert!(lex_error("'12'").contains("missing its unit"));
}

#[test]
fn comment_lex_errors() {
    assert!(lex_error("# never closed").contains("closing"));
}

#[test]
fn rendered_tokens_have_one_line_per_token() {
    let rendered = lex_source("var d = 12.04.2018\nprint d").unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines,
               vec!["1:1 Var",
                    "1:5 Identifier d",
                    "1:7 Equals",
                    "1:9 Date 12.04.2018",
                    "2:1 Print",
                    "2:7 Identifier d",
                    "2:8 End"]);
}
