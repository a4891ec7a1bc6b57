use timon::run_source;

fn run(src: &str) -> Result<String, String> {
    let mut out = Vec::new();
    match run_source(src, &mut out) {
        Ok(()) => Ok(String::from_utf8(out).expect("print output is valid UTF-8")),
        Err(e) => Err(e.to_string()),
    }
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected, "wrong output for:\n{src}"),
        Err(e) => panic!("Script failed: {e}\nScript:\n{src}"),
    }
}

fn assert_error_contains(src: &str, needle: &str) {
    match run(src) {
        Ok(output) => panic!("Script succeeded with output {output:?} but was expected to fail"),
        Err(e) => assert!(e.contains(needle),
                          "error {e:?} does not mention {needle:?} for:\n{src}"),
    }
}

#[test]
fn number_arithmetic() {
    assert_output("print 1+2", "3\n");
    assert_output("print 7 * 9", "63\n");
    assert_output("print 8 - 5", "3\n");
    assert_output("print 10 / 2", "5\n");
    assert_output("print 2 + 3 * 4", "14\n");
    assert_output("print (2 + 3) * 4", "20\n");
}

#[test]
fn division_truncates_toward_zero() {
    assert_output("print 7 / 2", "3\n");
    assert_output("print -7 / 2", "-3\n");
    assert_output("print 7 / -2", "-3\n");
    assert_output("print -7 / -2", "3\n");
}

#[test]
fn negative_zero_is_zero() {
    assert_output("print -0", "0\n");
    assert_output("var x = 0 if -x == 0 { print \"same\" }", "same\n");
}

#[test]
fn string_concatenation() {
    assert_output("print \"ab\"+\"cd\"", "abcd\n");
    assert_output("print \"say \\\"hi\\\"\"", "say \"hi\"\n");
    assert_error_contains("print \"a\" + 1", "TypeError");
}

#[test]
fn date_plus_month_clamps() {
    assert_output("print 31.01.2024 + '1M'", "29.02.2024\n");
    assert_output("print 31.01.2023 + '1M'", "28.02.2023\n");
    assert_output("print 31.05.2020 + '1M'", "30.06.2020\n");
    assert_output("print 29.02.2020 + '1Y'", "28.02.2021\n");
}

#[test]
fn year_and_month_clamp_once_at_the_end() {
    // The day is clamped against the final month, not after each unit.
    assert_output("print 29.02.2020 + '1Y 1M'", "29.03.2021\n");
    assert_output("print 31.01.2020 + '1Y 1M'", "28.02.2021\n");
    assert_output("print 29.02.2020 - '1Y 1M'", "29.01.2019\n");
    assert_output("print 31.03.2020 - '1Y 1M'", "28.02.2019\n");
}

#[test]
fn date_day_arithmetic() {
    assert_output("print 27.05.2020 + '10D'", "06.06.2020\n");
    assert_output("print 06.06.2020 - '10D'", "27.05.2020\n");
    assert_output("print 27.05.2020 + '2W'", "10.06.2020\n");
    assert_output("print 01.01.2020 - '1D'", "31.12.2019\n");
}

#[test]
fn datetime_carries_through_midnight() {
    assert_output("var d = 01.01.2020~23:59:59 + '1s' print d", "02.01.2020~00:00:00\n");
    assert_output("print 27.05.2020~20:37:35 + '4h'", "28.05.2020~00:37:35\n");
    assert_output("print 27.05.2020~20:37:35 + '10D 30m'", "06.06.2020~21:07:35\n");
    assert_output("print 01.01.2020~00:00:00 - '1s'", "31.12.2019~23:59:59\n");
}

#[test]
fn time_wraps_modulo_a_day() {
    assert_output("print 20:37:35 + '30m'", "21:07:35\n");
    assert_output("print 20:37:35 + '4h'", "00:37:35\n");
    assert_output("print 01:00:00 - '2h'", "23:00:00\n");
    // Whole-day components never move the clock.
    assert_output("print 20:37:35 + '3D'", "20:37:35\n");
}

#[test]
fn temporal_differences() {
    assert_output("print 29.02.2020 - 28.02.2020", "'1D'\n");
    assert_output("print 01.03.2021 - 01.03.2020", "'365D'\n");
    assert_output("print 20:37:35 - 19:37:35", "'1h'\n");
    assert_output("print 19:37:35 - 20:38:36", "'-1h -1m -1s'\n");
    assert_output("print 28.02.2021~00:00:00 - 27.02.2021~23:59:59", "'1s'\n");
    assert_output("print 02.01.2020~01:00:00 - 01.01.2020~00:00:00", "'1D 1h'\n");
}

#[test]
fn timedelta_arithmetic() {
    assert_output("print '1M' + '1Y'", "'1Y 1M'\n");
    assert_output("print '1M' - '1Y'", "'-1Y 1M'\n");
    assert_output("print '1M 5D' * 2", "'2M 10D'\n");
    assert_output("print 2 * '1M 5D'", "'2M 10D'\n");
    assert_output("print '2M 10D' / 2", "'1M 5D'\n");
    assert_output("print -'1M 5D'", "'-1M -5D'\n");
    assert_output("print '1Y' - '1Y'", "'0s'\n");
}

#[test]
fn timedelta_equality_normalizes_exact_units() {
    assert_output("if '1W' == '7D' { print \"eq\" }", "eq\n");
    assert_output("if '1h' == '60m' { print \"eq\" }", "eq\n");
    assert_output("if '1M' != '30D' { print \"ne\" }", "ne\n");
    assert_output("if '1M' != '31D' { print \"ne\" }", "ne\n");
}

#[test]
fn timedelta_ordering_counts_peak_month_lengths() {
    assert_output("if '1W' < '8D' { print \"lt\" }", "lt\n");
    assert_output("if '1M' < '32D' { print \"lt\" }", "lt\n");
    assert_output("if !('1M' < '31D') { print \"ge\" }", "ge\n");
    assert_output("if '20D' < '1M' - '1W' { print \"lt\" }", "lt\n");
    assert_output("if !('27D' < '1M' - '1W') { print \"ge\" }", "ge\n");
}

#[test]
fn field_access() {
    assert_output("var d = '1Y 2M 3W 4D 5h 6m 7s' print d.years print d.months print d.weeks \
                   print d.days print d.hours print d.minutes print d.seconds",
                  "1\n2\n3\n4\n5\n6\n7\n");
    assert_output("var d = 27.05.2020 print d.days print d.months print d.years",
                  "27\n5\n2020\n");
    assert_output("var t = 20:37:35 print t.hours print t.minutes print t.seconds",
                  "20\n37\n35\n");
    assert_output("var dt = 27.05.2020~20:37:35 print dt.years print dt.hours", "2020\n20\n");
    assert_output("print '90m'.minutes", "90\n");
    assert_error_contains("print 27.05.2020.hours", "TypeError");
    assert_error_contains("print 27.05.2020~20:37:35.weeks", "TypeError");
    assert_error_contains("print 5.days", "TypeError");
}

#[test]
fn comparisons() {
    assert_output("if 2 < 3 { print \"lt\" }", "lt\n");
    assert_output("if \"abc\" < \"abd\" { print \"lt\" }", "lt\n");
    assert_output("if 27.05.2020 < 28.05.2020 { print \"lt\" }", "lt\n");
    assert_output("if 20:37:35 < 20:37:36 { print \"lt\" }", "lt\n");
    assert_output("if 26.05.2020~23:59:59 < 27.05.2020~00:00:00 { print \"lt\" }", "lt\n");
    assert_output("if 2 == 2 { print \"eq\" }", "eq\n");
    assert_output("if 2 != 3 { print \"ne\" }", "ne\n");
    assert_error_contains("print 1 < \"a\"", "TypeError");
    assert_error_contains("print 27.05.2020 == 20:37:35", "TypeError");
    assert_error_contains("print 27.05.2020 < 27.05.2020~00:00:00", "TypeError");
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("if 1 == 1 | 1 / 0 == 0 { print \"or\" }", "or\n");
    assert_output("if !(1 == 2 & 1 / 0 == 0) { print \"and\" }", "and\n");
    assert_output("if !(1 == 2) { print \"not\" }", "not\n");
    assert_error_contains("if 1 & 1 == 1 { print \"x\" }", "TypeError");
    assert_error_contains("if !5 { print \"x\" }", "TypeError");
    assert_error_contains("if 5 { print \"x\" }", "TypeError");
}

#[test]
fn from_loop_over_dates() {
    assert_output("from 01.01.2020 to 03.01.2020 by days as i { print i }",
                  "01.01.2020\n02.01.2020\n03.01.2020\n");
    assert_output("from 01.01.2020 to 01.01.2020 by days as i { print i }", "01.01.2020\n");
    assert_output("from 02.01.2020 to 01.01.2020 by days as i { print i }", "");
    assert_output("from 25.05.2020 to 14.06.2020 by weeks as i { print i }",
                  "25.05.2020\n01.06.2020\n08.06.2020\n");
    assert_output("from 25.05.2020 to 08.06.2020 by weeks as i { print i }",
                  "25.05.2020\n01.06.2020\n08.06.2020\n");
}

#[test]
fn from_loop_steps_by_month_with_clamping() {
    assert_output("from 31.01.2020 to 30.04.2020 by months as i { print i }",
                  "31.01.2020\n29.02.2020\n29.03.2020\n29.04.2020\n");
}

#[test]
fn from_loop_over_times_and_datetimes() {
    assert_output("from 10:00:00 to 12:00:00 by hours as t { print t }",
                  "10:00:00\n11:00:00\n12:00:00\n");
    assert_output("from 23:59:58 to 23:59:59 by seconds as t { print t }",
                  "23:59:58\n23:59:59\n");
    assert_output("from 31.12.2019~23:00:00 to 01.01.2020~01:00:00 by hours as t { print t }",
                  "31.12.2019~23:00:00\n01.01.2020~00:00:00\n01.01.2020~01:00:00\n");
}

#[test]
fn from_loop_rejects_bad_ranges() {
    assert_error_contains("from 1 to 3 by days as i { print i }", "TypeError");
    assert_error_contains("from 01.01.2020 to 10:00:00 by days as i { print i }", "TypeError");
    assert_error_contains("from 10:00:00 to 12:00:00 by days as t { print t }", "TypeError");
    assert_error_contains("from 01.01.2020 to 02.01.2020 by hours as d { print d }",
                          "TypeError");
}

#[test]
fn functions_and_calls() {
    assert_output("fun f(x){ return x*2 } print f(5)", "10\n");
    assert_output("fun add(a, b){ return a + b } print add(2, 5)", "7\n");
    assert_output("fun greet(){ print \"hi\" } greet()", "hi\n");
    assert_output("fun nothing(){ } print nothing()", "\n");
    assert_output("fun shift(d){ return d + '1D' } print shift(31.12.2019)", "01.01.2020\n");
}

#[test]
fn return_unwinds_nested_blocks() {
    assert_output("fun pick(n){ if n > 2 { return \"big\" } return \"small\" } print pick(5) \
                   print pick(1)",
                  "big\nsmall\n");
    assert_output("fun first(d1, d2){ from d1 to d2 by days as d { return d } return d2 } print \
                   first(05.05.2020, 10.05.2020)",
                  "05.05.2020\n");
}

#[test]
fn recursion_works() {
    assert_output("fun fac(n){ if n < 2 { return 1 } return n * fac(n - 1) } print fac(10)",
                  "3628800\n");
}

#[test]
fn runaway_recursion_is_reported() {
    assert_error_contains("fun f(n){ return f(n + 1) } print f(0)", "RuntimeError");
}

#[test]
fn scopes_and_shadowing() {
    // Inner blocks may shadow outer names; the same scope may not rebind.
    assert_output("var x = 1 if 1 == 1 { var x = 2 print x } print x", "2\n1\n");
    assert_error_contains("var x = 1 var x = 2", "NameError");
    // Assignment updates the nearest enclosing binding.
    assert_output("var x = 1 if 1 == 1 { x = 2 } print x", "2\n");
    assert_error_contains("y = 1", "NameError");
}

#[test]
fn var_without_initializer_holds_unit() {
    assert_output("var x print x", "\n");
    assert_output("var x x = 3 print x", "3\n");
}

#[test]
fn functions_cannot_see_caller_locals() {
    assert_error_contains("fun f(){ return hidden } fun g(){ var hidden = 1 return f() } print \
                           g()",
                          "NameError");
    assert_output("var shared = 7 fun f(){ return shared } print f()", "7\n");
    assert_output("var counter = 0 fun bump(){ counter = counter + 1 } bump() bump() print \
                   counter",
                  "2\n");
}

#[test]
fn name_rules() {
    assert_error_contains("fun f(){ } fun f(){ }", "NameError");
    assert_error_contains("var f = 1 fun f(){ }", "NameError");
    assert_error_contains("fun f(){ } var f = 1", "NameError");
    assert_error_contains("print missing", "NameError");
    assert_error_contains("missing()", "NameError");
    assert_error_contains("fun f(x, x){ return x } print f(1, 2)", "NameError");
}

#[test]
fn loop_iterator_is_scoped_to_the_body() {
    assert_error_contains("from 01.01.2020 to 02.01.2020 by days as i { var i = 1 } ",
                          "NameError");
    assert_error_contains("from 01.01.2020 to 02.01.2020 by days as i { } print i", "NameError");
}

#[test]
fn arity_is_checked() {
    assert_error_contains("fun f(x, y){ return x } print f(3)", "ArityError");
    assert_error_contains("fun f(){ return 1 } print f(3)", "ArityError");
}

#[test]
fn arithmetic_errors() {
    assert_error_contains("print 10/0", "ArithmeticError");
    assert_error_contains("print '1D' / 0", "ArithmeticError");
    assert_error_contains("print 31.12.9999 + '1D'", "ArithmeticError");
    assert_error_contains("print 01.01.0001 - '1M'", "ArithmeticError");
    assert_error_contains("print 9223372036854775807 + 1", "ArithmeticError");
}

#[test]
fn type_errors() {
    assert_error_contains("print 1 + 10:00:00", "TypeError");
    assert_error_contains("print 27.05.2020 + 28.05.2020", "TypeError");
    assert_error_contains("print 27.05.2020 + 20:37:35", "TypeError");
    assert_error_contains("print '1D' * '1D'", "TypeError");
    assert_error_contains("print -\"abc\"", "TypeError");
}

#[test]
fn top_level_return_is_an_error() {
    assert_error_contains("return 1", "RuntimeError");
    assert_error_contains("if 1 == 1 { return 1 }", "RuntimeError");
}

#[test]
fn print_renders_canonical_forms() {
    assert_output("print 27.05.2020", "27.05.2020\n");
    assert_output("print 09:05:03", "09:05:03\n");
    assert_output("print 01.01.0001~00:00:00", "01.01.0001~00:00:00\n");
    assert_output("print '1Y 2M 3W 4D 5h 6m 7s'", "'1Y 2M 3W 4D 5h 6m 7s'\n");
    assert_output("print '0s'", "'0s'\n");
    assert_output("print 1 == 1", "true\n");
    assert_output("print 1 == 2", "false\n");
    assert_output("print \"\"", "\n");
}

#[test]
fn output_before_an_error_is_retained() {
    let mut out = Vec::new();
    let result = run_source("print \"first\" print 1 / 0", &mut out);
    assert!(result.is_err());
    assert_eq!(out, b"first\n");
}

#[test]
fn parse_errors() {
    assert_error_contains("print 1 < 2 < 3", "ParseError");
    assert_error_contains("print 1 == 2 == 3", "ParseError");
    assert_error_contains("print --1", "ParseError");
    assert_error_contains("print !!(1 == 1)", "ParseError");
    assert_error_contains("var", "ParseError");
    assert_error_contains("x", "ParseError");
    assert_error_contains("print (1 + 2", "ParseError");
    assert_error_contains("if 1 == 1 { print 1 ", "ParseError");
    assert_error_contains("fun f(x){ fun g(){ } }", "ParseError");
    assert_error_contains("return", "ParseError");
}

#[test]
fn adding_then_subtracting_a_month_free_delta_round_trips() {
    assert_output("if (27.05.2020 + '2W 6h') - '2W 6h' == 27.05.2020 { print \"same\" }",
                  "same\n");
    assert_output("if (01.01.2020~10:00:00 + '3D 5h') - '3D 5h' == 01.01.2020~10:00:00 { print \
                   \"same\" }",
                  "same\n");
    assert_output("if (10:00:00 + '7h') - '7h' == 10:00:00 { print \"same\" }", "same\n");
}

#[test]
fn parser_stage_tree_is_deterministic() {
    let program = timon::parse_source("fun f(x){ return x * 2 } print f(5)").unwrap();
    let expected = ["Program",
                    "  FunctionDef f(x)",
                    "    Return",
                    "      Binary *",
                    "        Variable x",
                    "        Literal 2",
                    "  Print",
                    "    Call f",
                    "      Literal 5",
                    ""].join("\n");
    assert_eq!(program.tree_string(), expected);
    assert_eq!(timon::parse_source("").unwrap().tree_string(), "Program\n");
}

#[test]
fn mixed_comparison_levels_parse() {
    assert_output("if 1 < 2 == 3 > 2 { print \"ok\" }", "ok\n");
    assert_output("if (1 < 2) & (2 < 3) { print \"ok\" }", "ok\n");
}

#[test]
fn lex_errors() {
    assert_error_contains("print 1 $ 2", "LexError");
    assert_error_contains("print 013", "LexError");
    assert_error_contains("print 32.01.2020", "LexError");
    assert_error_contains("print 01.13.2020", "LexError");
    assert_error_contains("print 29.02.2019", "LexError");
    assert_error_contains("print 24:00:00", "LexError");
    assert_error_contains("print 10:60:00", "LexError");
    assert_error_contains("print \"unterminated", "LexError");
    assert_error_contains("print '1D", "LexError");
    assert_error_contains("print ''", "LexError");
    assert_error_contains("print '1D 2D'", "LexError");
    assert_error_contains("print '1M 1Y'", "LexError");
    assert_error_contains("print '1x'", "LexError");
    assert_error_contains("# never closed", "LexError");
}

#[test]
fn comments_are_skipped() {
    assert_output("# leading # print 1 # trailing #", "1\n");
    assert_output("print # inline # 2", "2\n");
    assert_output("# one\nspanning\nlines # print 3", "3\n");
}
