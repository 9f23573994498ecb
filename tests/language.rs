use husk::{interpret, Error, Outcome};

fn run(source: &str) -> (Result<Outcome, Error>, String) {
    let mut out = Vec::new();
    let outcome = interpret(source, &mut out);
    (outcome, String::from_utf8(out).expect("program output is not utf-8"))
}

fn assert_success(source: &str) {
    if let (Err(err), _) = run(source) {
        panic!("script failed: {}\nsource: {}", err, source);
    }
}

fn assert_failure(source: &str) {
    if run(source).0.is_ok() {
        panic!("script succeeded but was expected to fail: {}", source);
    }
}

#[test]
fn declaration_and_basic_arithmetic() {
    assert_success("var x = 1 + 2; print(x);");
    assert_success("var x = 7 * 9; print(x);");
    assert_success("var x = 8 - 5; print(x);");
    assert_success("var x = 10 / 2; print(x);");
}

#[test]
fn assignment_after_declaration() {
    assert_success("var x = 2; x = x + 3; print(x);");
    assert_success("var s = \"a\"; s = \"b\"; print(s);");
}

#[test]
fn comments_are_ignored() {
    assert_success("// leading comment\nvar x = 1; /* inline */ print(x);");
    assert_success("/* spanning\nlines */ print(1);");
}

#[test]
fn end_to_end_scenario() {
    let source = "var a = 10;\nvar b = 20;\nprint(a + b);\nexit(0);\n";
    let (outcome, printed) = run(source);

    assert_eq!(printed, "30\n");
    match outcome {
        Ok(Outcome::Exit(code)) => assert_eq!(code, 0),
        other => panic!("expected exit outcome, got {:?}", other),
    }
}

#[test]
fn precedence_in_program_output() {
    let (outcome, printed) = run("print(50 * 50 + 10 * 5 / 10);");
    assert_eq!(outcome, Ok(Outcome::Completed));
    assert_eq!(printed, "2505\n");
}

#[test]
fn exit_code_from_expression() {
    assert_eq!(run("exit(40 + 2);").0, Ok(Outcome::Exit(42)));
}

#[test]
fn exit_accepts_numeric_strings() {
    assert_eq!(run("exit(\"5\");").0, Ok(Outcome::Exit(5)));
    assert_failure("exit(\"abc\");");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("exit(1 / 0);");
}

#[test]
fn assignment_without_declaration_is_error() {
    assert_failure("x = 1;");
}

#[test]
fn redeclaration_is_error() {
    assert_failure("var x = 1; var x = 1;");
}

#[test]
fn undefined_identifier_is_error() {
    assert_failure("print(y);");
}

#[test]
fn input_is_error() {
    assert_failure("var x = 1; input(x);");
}

#[test]
fn strings_do_not_join_arithmetic() {
    assert_failure("var s = \"a\" + \"b\";");
    assert_failure("print(1 + \"a\");");
}

#[test]
fn lexical_errors_are_fatal() {
    assert_failure("var x = 5 ?;");
    assert_failure("print(\"unterminated);");
    assert_failure("/* never closed");
}

#[test]
fn statements_run_in_order() {
    let (outcome, printed) = run("print(1); print(2); print(3);");
    assert_eq!(outcome, Ok(Outcome::Completed));
    assert_eq!(printed, "1\n2\n3\n");
}
