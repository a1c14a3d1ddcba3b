use pretty_assertions::assert_eq;
use super::*;

fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program().unwrap_or_else(|failure| panic!("{:?}: {}", source, failure));

    (program, parser.errors().to_vec())
}

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "parser errors for {:?}: {:?}", source, errors);
    program
}

fn parse_failure(source: &str) -> ParseFailure {
    match Parser::new(Lexer::new(source)).parse_program() {
        Ok(program) => panic!("{:?} parsed as {:?}", source, program),
        Err(failure) => failure,
    }
}

fn single_expression(source: &str) -> Expression {
    let mut program = parse_ok(source);
    assert_eq!(1, program.statements.len(), "{:?}", program);

    match program.statements.remove(0) {
        Statement::Expression(expr) => expr,
        other => panic!("not an expression statement: {:?}", other),
    }
}

#[test]
fn let_statements() {
    let program = parse_ok("let x = 5;\nlet y = true;\nlet foobar = y;");
    assert_eq!(3, program.statements.len());

    let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];

    for (statement, (expected_name, expected_value)) in program.statements.iter().zip(expected) {
        match statement {
            Statement::Let { token, name, value } => {
                assert_eq!("let", token.source());
                assert_eq!(expected_name, name.name());
                assert_eq!(expected_value, value.to_string());
            },
            other => panic!("not a let statement: {:?}", other),
        }
    }
}

#[test]
fn return_statements() {
    let program = parse_ok("return 5;\nreturn 10;\nreturn add(15)");
    assert_eq!(3, program.statements.len());

    for statement in &program.statements {
        assert!(matches!(statement, Statement::Return { .. }), "{:?}", statement);
        assert_eq!("return", statement.token_literal());
    }

    assert_eq!("return add(15);", program.statements[2].to_string());
}

#[test]
fn let_statement_errors() {
    let (program, errors) = parse("let x 5;\nlet = 10;\nlet 838383;");

    assert_eq!(vec![
        "expected next token to be =, got INT",
        "expected next token to be IDENT, got =",
        "expected next token to be IDENT, got INT",
    ], errors);
    assert!(program.statements.is_empty(), "{:?}", program);
}

#[test]
fn recovers_after_bad_statement() {
    let (program, errors) = parse("let = 1; let y = 2; y");

    assert_eq!(vec!["expected next token to be IDENT, got ="], errors);
    assert_eq!("let y = 2;\ny\n", program.to_string());
}

#[test]
fn missing_prefix_function() {
    let (_, errors) = parse("@");
    assert_eq!(vec!["no prefix parse function for ILLEGAL found"], errors);

    let (_, errors) = parse("let x = ;");
    assert_eq!(vec!["no prefix parse function for ; found"], errors);
}

#[test]
fn literal_expressions() {
    assert_eq!(Expression::Identifier(Identifier::new(Token::new(TokenType::Identifier, "foobar"))),
        single_expression("foobar;"));
    assert_eq!(Expression::IntegerLiteral { token: Token::new(TokenType::Int, "5"), value: 5 },
        single_expression("5;"));
    assert_eq!(Expression::BooleanLiteral { token: Token::new(TokenType::False, "false"), value: false },
        single_expression("false"));
    assert_eq!(Expression::StringLiteral { token: Token::new(TokenType::String, "hello world"), value: "hello world".to_owned() },
        single_expression("\"hello world\""));
}

#[test]
fn integer_out_of_range() {
    assert_eq!(ParseFailure::InvalidInteger { literal: "9223372036854775808".to_owned() },
        parse_failure("9223372036854775808"));

    assert_eq!("9223372036854775807", single_expression("9223372036854775807").to_string());
}

#[test]
fn prefix_expressions() {
    for (source, operator, operand) in [("!5;", "!", "5"), ("-15;", "-", "15"), ("!true", "!", "true"), ("-a", "-", "a")] {
        match single_expression(source) {
            Expression::Prefix { operator: token, operand: expr } => {
                assert_eq!(operator, token.source());
                assert_eq!(operand, expr.to_string());
            },
            other => panic!("not a prefix expression: {:?}", other),
        }
    }
}

#[test]
fn infix_expressions() {
    for operator in ["+", "-", "*", "/", ">", "<", "==", "!="] {
        let source = format!("5 {} 5;", operator);

        match single_expression(&source) {
            Expression::Infix { left, operator: token, right } => {
                assert_eq!(operator, token.source());
                assert_eq!("5", left.to_string());
                assert_eq!("5", right.to_string());
            },
            other => panic!("not an infix expression: {:?}", other),
        }
    }
}

#[test]
fn operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4);\n((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
        ("true", "true"),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        ("add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))", "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
        ("add(a * b[2], b[1], 2 * [1, 2][1])", "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"),
    ];

    for (source, expected) in cases {
        let program = parse_ok(source);
        assert_eq!(expected, program.to_string().trim_end(), "{:?}", source);
    }
}

#[test]
fn if_expression() {
    match single_expression("if (x < y) { x }") {
        Expression::If { condition, consequence, alternative, .. } => {
            assert_eq!("(x < y)", condition.to_string());
            assert_eq!("{ x }", consequence.to_string());
            assert_eq!(None, alternative);
        },
        other => panic!("not an if expression: {:?}", other),
    }
}

#[test]
fn if_else_expression() {
    match single_expression("if (x < y) { x } else { y; z }") {
        Expression::If { consequence, alternative: Some(alternative), .. } => {
            assert_eq!(1, consequence.statements.len());
            assert_eq!(2, alternative.statements.len());
            assert_eq!("{ y; z }", alternative.to_string());
        },
        other => panic!("not an if-else expression: {:?}", other),
    }
}

#[test]
fn if_expression_errors() {
    let (_, errors) = parse("if x { 1 }");
    assert_eq!(vec!["expected next token to be (, got IDENT"], errors);

    let (_, errors) = parse("if (x) 1");
    assert_eq!(vec!["expected next token to be {, got INT"], errors);

    let (_, errors) = parse("if (x) { 1 } else 2");
    assert_eq!(vec!["expected next token to be {, got INT"], errors);
}

#[test]
fn unterminated_block() {
    let (program, errors) = parse("if (x) { 1");

    assert_eq!(vec!["expected next token to be }, got END_OF_FILE"], errors);
    assert!(program.statements.is_empty());
}

#[test]
fn block_recovers_from_bad_statement() {
    let (program, errors) = parse("if (x) { let = 1; 2 } else { 3 + }");

    assert_eq!(vec![
        "expected next token to be IDENT, got =",
        "no prefix parse function for } found",
    ], errors);
    assert_eq!("if (x) { 2 } else { }\n", program.to_string());
}

#[test]
fn function_literal() {
    match single_expression("fn(x, y) { x + y; }") {
        Expression::FunctionLiteral { parameters, body, .. } => {
            let names: Vec<&str> = parameters.iter().map(Identifier::name).collect();
            assert_eq!(vec!["x", "y"], names);
            assert_eq!("{ (x + y) }", body.to_string());
        },
        other => panic!("not a function literal: {:?}", other),
    }
}

#[test]
fn function_parameters() {
    for (source, expected) in [("fn() {};", vec![]), ("fn(x) {};", vec!["x"]), ("fn(x, y, z) {};", vec!["x", "y", "z"])] {
        match single_expression(source) {
            Expression::FunctionLiteral { parameters, .. } => {
                let names: Vec<&str> = parameters.iter().map(Identifier::name).collect();
                assert_eq!(expected, names, "{:?}", source);
            },
            other => panic!("not a function literal: {:?}", other),
        }
    }
}

#[test]
fn function_parameter_errors() {
    let (_, errors) = parse("fn(1) { }");
    assert_eq!(vec!["expected next token to be IDENT, got INT"], errors);

    assert_eq!(ParseFailure::UnterminatedParameters { got: TokenType::Identifier }, parse_failure("fn(x y) { }"));
    assert_eq!(ParseFailure::UnterminatedParameters { got: TokenType::Eof }, parse_failure("fn(x, y"));
}

#[test]
fn call_expression() {
    match single_expression("add(1, 2 * 3, 4 + 5);") {
        Expression::Call { callee, arguments, .. } => {
            assert_eq!("add", callee.to_string());
            let arguments: Vec<String> = arguments.iter().map(Expression::to_string).collect();
            assert_eq!(vec!["1", "(2 * 3)", "(4 + 5)"], arguments);
        },
        other => panic!("not a call expression: {:?}", other),
    }

    assert_eq!("fn(x) { x }(5)", single_expression("fn(x) { x }(5)").to_string());
}

#[test]
fn unterminated_lists() {
    assert_eq!(ParseFailure::UnterminatedList { expected: TokenType::ParenthesisRight, got: TokenType::Eof },
        parse_failure("add(1, 2"));
    assert_eq!(ParseFailure::UnterminatedList { expected: TokenType::SquareBracketRight, got: TokenType::Semicolon },
        parse_failure("[1, 2;"));
}

#[test]
fn array_literal() {
    match single_expression("[1, 2 * 2, 3 + 3]") {
        Expression::ArrayLiteral { elements, .. } => {
            assert_eq!(3, elements.len());
            assert_eq!("(2 * 2)", elements[1].to_string());
        },
        other => panic!("not an array literal: {:?}", other),
    }

    assert_eq!("[]", single_expression("[]").to_string());
}

#[test]
fn index_expression() {
    match single_expression("myArray[1 + 1]") {
        Expression::Index { collection, index, .. } => {
            assert_eq!("myArray", collection.to_string());
            assert_eq!("(1 + 1)", index.to_string());
        },
        other => panic!("not an index expression: {:?}", other),
    }

    let (_, errors) = parse("a[1");
    assert_eq!(vec!["expected next token to be ], got END_OF_FILE"], errors);
}

#[test]
fn hash_literals() {
    match single_expression(r#"{"one": 1, "two": 2, "three": 3}"#) {
        Expression::HashLiteral { pairs, .. } => {
            let pairs: Vec<(String, String)> = pairs.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())).collect();

            assert_eq!(vec![
                ("\"one\"".to_owned(), "1".to_owned()),
                ("\"two\"".to_owned(), "2".to_owned()),
                ("\"three\"".to_owned(), "3".to_owned()),
            ], pairs);
        },
        other => panic!("not a hash literal: {:?}", other),
    }

    assert_eq!("{}", single_expression("{}").to_string());
    assert_eq!(r#"{"one": (0 + 1), true: (10 - 8)}"#, single_expression(r#"{"one": 0 + 1, true: 10 - 8}"#).to_string());
}

#[test]
fn hash_literal_errors() {
    let (_, errors) = parse("{1 2}");
    assert_eq!(vec!["expected next token to be :, got INT"], errors);

    let (_, errors) = parse("{1: 2 3: 4}");
    assert_eq!(vec!["expected next token to be ,, got INT"], errors);
}

#[test]
fn printed_program_parses_back() {
    let sources = [
        "let add = fn(a, b) { return a + b; }; add(1, 2 * 3)",
        "if (!(a == b)) { \"yes\" } else { let c = [1, 2][0]; c }",
        "let h = {\"k\": fn(x) { x }, 2: true}; h[\"k\"](-5)",
        "a; b; (c)",
        "fn() { }",
    ];

    for source in sources {
        let program = parse_ok(source);
        let reparsed = parse_ok(&program.to_string());

        assert_eq!(program.to_string(), reparsed.to_string(), "{:?}", source);
        assert_eq!(program.statements.len(), reparsed.statements.len(), "{:?}", source);
    }
}
