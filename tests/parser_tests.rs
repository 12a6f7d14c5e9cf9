use gotolang::diagnostics::{check, parse_source, ParseOutcome};
use gotolang::labels::{resolve_computed_index, LabelRegistry};
use gotolang::lexer::tokenize;
use gotolang::parser::{
    BinaryOp, Command, ErrorKind, Factor, GotoTarget, Parser, ParserError, RelationalOp,
    MAX_NESTING_DEPTH,
};

/// Parse a source that must be accepted
fn accept(source: &str) -> gotolang::parser::Program {
    match parse_source(source) {
        Ok(program) => program,
        Err(err) => panic!("expected {source:?} to parse, got: {err}"),
    }
}

/// Parse a source that must be rejected
fn reject(source: &str) -> ParserError {
    match parse_source(source) {
        Ok(program) => panic!("expected {source:?} to fail, parsed: {program:?}"),
        Err(err) => err,
    }
}

fn expected_found(err: &ParserError) -> (&str, &str) {
    match err {
        ParserError::ExpectedToken {
            expected, found, ..
        } => (expected.as_str(), found.as_str()),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

// Accepted programs

#[test]
fn test_end_only() {
    let program = accept("END");
    assert_eq!(program.commands.len(), 1);
    assert_eq!(program.commands[0].command, Command::Empty);
    assert!(check("END").is_success());
}

#[test]
fn test_assignment_and_print() {
    let program = accept("LET A := 1 + 2; PRINT A; END");
    // The trailing ';' leaves an empty command before END
    assert_eq!(program.commands.len(), 3);
    assert_eq!(program.commands[2].command, Command::Empty);

    match &program.commands[0].command {
        Command::Let { target, value } => {
            assert_eq!(target, "A");
            assert_eq!(value.first, Factor::Number("1".to_string()));
            assert_eq!(value.rest, vec![(BinaryOp::Add, Factor::Number("2".to_string()))]);
        }
        other => panic!("expected LET, got {other:?}"),
    }
    assert_eq!(
        program.commands[1].command,
        Command::Print(vec![gotolang::parser::Expression::new(
            Factor::Identifier("A".to_string()),
            vec![],
            22,
        )])
    );
}

#[test]
fn test_cursor_ends_at_token_count() {
    let source = "L1: READ A, B; IF A < B THEN GO TO L1 ELSE PRINT A, B; END";
    let tokens = tokenize(source).unwrap();
    let count = tokens.len();

    let mut parser = Parser::new(tokens);
    parser.parse_program().unwrap();
    assert_eq!(parser.position(), count);
    assert_eq!(parser.token_count(), count);
    assert!(parser.labels().contains("L1"));
}

#[test]
fn test_expression_chain_is_flat() {
    let program = accept("LET R := (A + B) * (C - D / 2); END");
    let Command::Let { value, .. } = &program.commands[0].command else {
        panic!("expected LET");
    };
    assert!(matches!(value.first, Factor::Paren(_)));
    assert_eq!(value.rest.len(), 1);
    assert_eq!(value.rest[0].0, BinaryOp::Mul);

    let Factor::Paren(inner) = &value.rest[0].1 else {
        panic!("expected parenthesized factor");
    };
    let ops: Vec<_> = inner.rest.iter().map(|(op, _)| *op).collect();
    assert_eq!(ops, vec![BinaryOp::Sub, BinaryOp::Div]);
    assert_eq!(value.to_string(), "(A + B) * (C - D / 2)");
}

#[test]
fn test_if_with_labeled_branches() {
    let program = accept("START: IF X >= Y THEN T: LET Z := 1 ELSE LET Z := 0; PRINT Z; END");
    assert_eq!(program.commands[0].label.as_deref(), Some("START"));

    let Command::If {
        op,
        then_branch,
        else_branch,
        ..
    } = &program.commands[0].command
    else {
        panic!("expected IF");
    };
    assert_eq!(*op, RelationalOp::GreaterEqual);
    assert_eq!(then_branch.label.as_deref(), Some("T"));
    assert!(matches!(then_branch.command, Command::Let { .. }));
    assert_eq!(else_branch.label, None);
}

#[test]
fn test_all_relational_operators() {
    for op in ["=", ">", ">=", "<", "<="] {
        let source = format!("IF A {op} B THEN PRINT A ELSE PRINT B; END");
        accept(&source);
    }
}

#[test]
fn test_nested_if() {
    accept("IF A = 1 THEN IF B = 2 THEN PRINT 1 ELSE PRINT 2 ELSE PRINT 3; END");
}

#[test]
fn test_direct_and_computed_goto() {
    let program = accept("GO TO 2 OF L1, L2, L3; GO TO L1; L1: PRINT 1; L2: PRINT 2; L3: END");
    assert_eq!(
        program.commands[0].command,
        Command::Goto(GotoTarget::Computed {
            index: 2,
            labels: vec!["L1".to_string(), "L2".to_string(), "L3".to_string()],
        })
    );
    assert_eq!(
        program.commands[1].command,
        Command::Goto(GotoTarget::Label("L1".to_string()))
    );
}

#[test]
fn test_goto_targets_need_not_exist() {
    accept("GO TO NOWHERE; END");
    accept("GO TO 1 OF MISSING; END");
}

#[test]
fn test_empty_commands() {
    accept("LET A := 1;; END");
    accept("; END");
    accept("L1: ; END");
    accept("IF A > B THEN ELSE PRINT B; END");
    accept("IF A > B THEN PRINT A ELSE ; END");
    accept("IF A > B THEN PRINT A ELSE END");
}

#[test]
fn test_whitespace_variants() {
    accept("LET A:=1;END");
    accept("   LET    A  :=  1 ;  PRINT   A  ;  END   ");
    accept("let a := 1;\nprint a;\nend");
}

#[test]
fn test_non_ascii_identifiers() {
    let program = accept("LET café := 1; PRINT café; END");
    assert!(matches!(&program.commands[0].command, Command::Let { target, .. } if target == "café"));
    assert!(check("ÜBER: READ straße; GO TO ÜBER; END").is_success());
}

/// `depth` parentheses around a single number
fn nested_parens(depth: usize) -> String {
    format!("LET A := {}1{}; END", "(".repeat(depth), ")".repeat(depth))
}

/// `depth` IF commands, each nested in the THEN branch of the one before
fn nested_ifs(depth: usize, innermost: &str) -> String {
    format!(
        "{}{innermost}{}; END",
        "IF A = B THEN ".repeat(depth),
        " ELSE PRINT 2".repeat(depth)
    )
}

#[test]
fn test_nesting_up_to_limit_is_accepted() {
    accept(&nested_parens(MAX_NESTING_DEPTH));
    accept(&nested_ifs(MAX_NESTING_DEPTH, "PRINT 1"));
}

// Syntax errors

#[test]
fn test_missing_assign_operator() {
    let err = reject("LET A = 1; END");
    assert_eq!(err.kind(), ErrorKind::SyntaxError);
    assert_eq!(expected_found(&err), ("':='", "'='"));
    assert_eq!(err.offset(), 6);
    assert_eq!(err.token_index(), Some(2));
}

#[test]
fn test_missing_close_paren() {
    let err = reject("LET A := (1 + 2; END");
    assert_eq!(expected_found(&err), ("')'", "';'"));
}

#[test]
fn test_missing_to_and_of() {
    let err = reject("GO L1; END");
    assert_eq!(expected_found(&err), ("'TO'", "'L1'"));

    let err = reject("GO TO 1 L1; END");
    assert_eq!(expected_found(&err), ("'OF'", "'L1'"));

    let err = reject("GO TO ; END");
    assert_eq!(expected_found(&err).1, "';'");

    let err = reject("L1: LET X := 10; GO TO OF L2; END");
    assert_eq!(expected_found(&err).1, "'OF'");
}

#[test]
fn test_trailing_comma_in_lists() {
    let err = reject("READ X, ; END");
    assert_eq!(expected_found(&err), ("identifier after ','", "';'"));

    let err = reject("GO TO 1 OF L1, ; END");
    assert_eq!(expected_found(&err), ("label after ','", "';'"));

    let err = reject("PRINT A,; END");
    assert_eq!(expected_found(&err).1, "';'");
}

#[test]
fn test_empty_lists_rejected() {
    assert_eq!(expected_found(&reject("READ ; END")).0, "identifier");
    assert_eq!(expected_found(&reject("GO TO 1 OF ; END")).0, "label");
    assert_eq!(expected_found(&reject("PRINT ,A; END")).1, "','");
}

#[test]
fn test_if_errors() {
    let err = reject("IF X THEN PRINT Y ELSE PRINT Z; END");
    assert!(expected_found(&err).0.starts_with("relational operator"));

    let err = reject("IF A > B PRINT A ELSE PRINT B; END");
    assert_eq!(expected_found(&err), ("'THEN'", "'PRINT'"));

    let err = reject("IF A > B THEN PRINT A END");
    assert_eq!(expected_found(&err), ("'ELSE'", "'END'"));

    let err = reject("IF A > B THEN ; ELSE PRINT B; END");
    assert_eq!(expected_found(&err), ("'ELSE'", "';'"));
}

#[test]
fn test_missing_end() {
    let err = reject("LET A := 1; LET B := 2");
    assert_eq!(expected_found(&err), ("'END'", "end of input"));
    assert_eq!(err.offset(), 22);

    let err = reject("");
    assert_eq!(expected_found(&err), ("'END'", "end of input"));
    assert_eq!(err.offset(), 0);
}

#[test]
fn test_missing_separator() {
    let err = reject("LET A := 1 PRINT B := 2; END");
    assert_eq!(expected_found(&err), ("'END'", "'PRINT'"));

    let err = reject("PRINT A B; END");
    assert_eq!(expected_found(&err), ("'END'", "'B'"));

    let err = reject("L1: READ X Y; END");
    assert_eq!(expected_found(&err).1, "'Y'");
}

#[test]
fn test_tokens_after_end() {
    let err = reject("IF A < B THEN GO TO L1 ELSE GO TO L2; L1: PRINT A; L2: PRINT B; END EXTRA");
    assert_eq!(expected_found(&err).1, "'EXTRA'");
}

#[test]
fn test_invalid_factor() {
    let err = reject("PRINT A+; END");
    assert_eq!(expected_found(&err), ("identifier, number or '('", "';'"));

    let err = reject("LET A := B C; END");
    assert_eq!(expected_found(&err).1, "'C'");
}

#[test]
fn test_stray_token_at_command_position() {
    let err = reject("A := 1; END");
    assert_eq!(expected_found(&err), ("a command", "'A'"));

    let err = reject("THEN; END");
    assert_eq!(expected_found(&err), ("a command", "'THEN'"));
}

#[test]
fn test_keywords_reported_in_canonical_spelling() {
    let err = reject("if a > b then print a end");
    assert_eq!(expected_found(&err), ("'ELSE'", "'END'"));

    let err = reject("Let x = 1; end");
    assert_eq!(expected_found(&err), ("':='", "'='"));

    let err = reject("print 1; end Then");
    assert_eq!(expected_found(&err).1, "'THEN'");
}

#[test]
fn test_deep_parentheses_rejected_without_overflow() {
    let err = reject(&nested_parens(100_000));
    assert_eq!(err.kind(), ErrorKind::SyntaxError);
    assert_eq!(
        err,
        ParserError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            offset: 9 + MAX_NESTING_DEPTH,
            index: 3 + MAX_NESTING_DEPTH,
        }
    );
    assert_eq!(
        check(&nested_parens(100_000)).report(),
        "syntax error at offset 137 (token 131): nesting too deep: more than 128 levels"
    );
}

#[test]
fn test_deep_if_chain_rejected_without_overflow() {
    let err = reject(&nested_ifs(100_000, "PRINT 1"));
    // Each "IF A = B THEN " is 14 characters and 5 tokens
    assert_eq!(
        err,
        ParserError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
            offset: 14 * MAX_NESTING_DEPTH,
            index: 5 * MAX_NESTING_DEPTH,
        }
    );
}

#[test]
fn test_parentheses_and_ifs_share_one_depth() {
    let ifs = MAX_NESTING_DEPTH - 28;
    let inner = |parens: usize| format!("PRINT {}1{}", "(".repeat(parens), ")".repeat(parens));

    accept(&nested_ifs(ifs, &inner(28)));
    let err = reject(&nested_ifs(ifs, &inner(29)));
    assert!(matches!(err, ParserError::NestingTooDeep { .. }));
}

// Semantic errors

#[test]
fn test_duplicate_label() {
    let err = reject("L1: PRINT 1; L1: PRINT 2; END");
    assert_eq!(err.kind(), ErrorKind::SemanticError);
    assert_eq!(
        err,
        ParserError::DuplicateLabel {
            name: "L1".to_string(),
            offset: 13,
            index: 5,
            first_offset: 0,
        }
    );
    assert!(err.message().contains("duplicate label"));
}

#[test]
fn test_duplicate_label_inside_if_branch() {
    let err = reject("L: PRINT 1; IF A = B THEN L: PRINT 2 ELSE PRINT 3; END");
    assert!(matches!(err, ParserError::DuplicateLabel { ref name, .. } if name == "L"));
}

#[test]
fn test_labels_are_case_sensitive() {
    accept("lbl: PRINT 1; LBL: PRINT 2; END");
}

#[test]
fn test_computed_goto_out_of_range() {
    let err = reject("GO TO 3 OF L1, L2; L1: PRINT 1; L2: PRINT 2; END");
    assert_eq!(err.kind(), ErrorKind::SemanticError);
    assert_eq!(
        err,
        ParserError::IndexOutOfRange {
            numeral: "3".to_string(),
            count: 2,
            offset: 6,
            index: 2,
        }
    );
    assert!(err.message().contains("index out of range"));

    let err = reject("GO TO 0 OF L1, L2; L1: PRINT 1; L2: PRINT 2; END");
    assert!(matches!(err, ParserError::IndexOutOfRange { .. }));
}

#[test]
fn test_huge_numeral_is_out_of_range() {
    let err = reject("GO TO 99999999999999999999999 OF A; END");
    assert!(matches!(err, ParserError::IndexOutOfRange { count: 1, .. }));
}

#[test]
fn test_first_error_wins() {
    // The duplicate label comes before the bad jump
    let err = reject("L1: PRINT 1; L1: GO TO 9 OF A; END");
    assert!(matches!(err, ParserError::DuplicateLabel { .. }));

    // A lexical error anywhere beats any parse error
    let err = reject("L1: PRINT 1; L1: PRINT 2; END $");
    assert_eq!(err.kind(), ErrorKind::LexicalError);
}

// Label helpers

#[test]
fn test_label_registry() {
    let mut labels = LabelRegistry::new();
    assert!(labels.is_empty());
    labels.define("B", 10).unwrap();
    labels.define("A", 20).unwrap();

    let first = labels.define("B", 30).unwrap_err();
    assert_eq!(first.offset, 10);
    assert_eq!(labels.len(), 2);
    assert_eq!(labels.lookup("B").map(|l| l.offset), Some(10));
    assert_eq!(labels.names(), vec!["B", "A"]);
}

#[test]
fn test_resolve_computed_index() {
    assert_eq!(resolve_computed_index("1", 3), Some(1));
    assert_eq!(resolve_computed_index("3", 3), Some(3));
    assert_eq!(resolve_computed_index("007", 8), Some(7));
    assert_eq!(resolve_computed_index("0", 3), None);
    assert_eq!(resolve_computed_index("4", 3), None);
    assert_eq!(resolve_computed_index("1", 0), None);
}

// Outcomes and reports

#[test]
fn test_reports() {
    assert_eq!(check("END").report(), "ok");

    assert_eq!(
        check("LET A = 1; END").report(),
        "syntax error at offset 6 (token 2): expected ':=', found '='"
    );
    assert_eq!(
        check("L1: PRINT 1; L1: PRINT 2; END").report(),
        "semantic error at offset 13 (token 5): duplicate label 'L1'"
    );
    assert_eq!(
        check("GO TO 3 OF L1, L2; END").report(),
        "semantic error at offset 6 (token 2): index out of range: 3 is not between 1 and 2"
    );
    assert_eq!(
        check("LET VAR$ := 10; END").report(),
        "lexical error at offset 7: unexpected character '$'"
    );
    assert_eq!(
        check("LET A := 1").report(),
        "syntax error at offset 10 (token 4): expected 'END', found end of input"
    );
}

#[test]
fn test_outcome_accessors() {
    let outcome = check("LET A := (1 + 2; END");
    let failure = outcome.failure().expect("should fail");
    assert_eq!(failure.kind, ErrorKind::SyntaxError);
    assert!(failure.message.contains("')'"));
    assert!(outcome.program().is_none());

    let outcome = check("PRINT 1; END");
    assert!(matches!(outcome, ParseOutcome::Success(_)));
    assert_eq!(outcome.program().map(|p| p.commands.len()), Some(2));
}

#[test]
fn test_repeated_checks_are_independent() {
    let source = "L1: PRINT 1; GO TO L1; END";
    assert_eq!(check(source), check(source));
    assert!(check(source).is_success());

    let bad = "L1: PRINT 1; L1: PRINT 2; END";
    assert_eq!(check(bad), check(bad));
}

#[test]
fn test_crate_root_reexports() {
    let tokens = gotolang::tokenize("PRINT 1; END").unwrap();
    assert_eq!(tokens[0].kind, gotolang::TokenKind::Keyword(gotolang::Keyword::Print));

    let outcome: gotolang::ParseOutcome = gotolang::check("END");
    assert!(outcome.is_success());
    assert_eq!(
        gotolang::check("LET A = 1; END").failure().map(|f| f.kind),
        Some(gotolang::ErrorKind::SyntaxError)
    );
}
