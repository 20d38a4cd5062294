#[cfg(test)]
mod grammars {
    use grammy::grammars;
    use grammy::language::Grammar;
    use grammy::parsing::Classification;

    fn check(grammar: &Grammar, full: &[&str], partial: &[&str], none: &[&str]) {
        let expectations = [
            (full, Classification::Full),
            (partial, Classification::Partial),
            (none, Classification::NoMatch),
        ];

        for (inputs, expected) in expectations {
            for input in inputs {
                let result = grammar
                    .parse(input)
                    .unwrap();
                assert_eq!(
                    result.classification,
                    expected,
                    "grammar '{}' on input {:?}",
                    grammar.name(),
                    input
                );
            }
        }
    }

    #[test]
    fn parameter_list() {
        check(
            &grammars::parameter_list().unwrap(),
            &["a, b, c", " a"],
            &["a, b, 3", "a, , b"],
            &["\ta, b", "A, b", ", b", ""],
        );
    }

    #[test]
    fn identifier() {
        check(
            &grammars::identifier().unwrap(),
            &["a", "some_id", "some_id0", "s0m3_1d0_", "_"],
            &["some_id0@", "some-id0"],
            &["-a", "0a"],
        );
    }

    #[test]
    fn integer() {
        check(
            &grammars::integer().unwrap(),
            &["12345678990", "0"],
            &["054"],
            &["a09", ""],
        );
    }

    #[test]
    fn float() {
        check(
            &grammars::float().unwrap(),
            &["0.0", "0", "12.0", "45.05300500", "-0.0"],
            &["05.0", "0."],
            &["+-0.0", ".0"],
        );
    }

    #[test]
    fn arithmetic() {
        check(
            &grammars::arithmetic().unwrap(),
            &["5", "5 + 3", "5 + 23 * val", "5 * 3 / val"],
            &["5 * 3 / val 3", "5 3"],
            &["", "."],
        );
    }

    #[test]
    fn arithmetic_tree() {
        let g = grammars::arithmetic().unwrap();
        let result = g
            .parse("5 + x")
            .unwrap();

        assert_eq!(
            result.tree(),
            r#"expression{
  mult_exp{
    add_exp{
      unary_exp{
        lit{
          int{'5'}
        }
      }
      add{'+'}
      unary_exp{
        var{'x'}
      }
    }
  }
}
"#
        );
    }

    #[test]
    fn bit_strings() {
        let g = grammars::bit_strings().unwrap();

        let full: Vec<String> = (0..8)
            .map(|i| format!("{:b}", i))
            .collect();
        let full: Vec<&str> = full
            .iter()
            .map(|s| s.as_str())
            .collect();

        check(&g, &full, &["0000", "012", "1011", "000\n"], &["", "2"]);
    }

    #[test]
    fn quoted_string() {
        check(
            &grammars::quoted_string().unwrap(),
            &[
                r#" " some text here" "#,
                r#" " some symbols here$&57/-., " "#,
                r#" " " "#,
                r#" "" "#,
            ],
            &[],
            &[r#" "a" a"#, r#""unterminated"#],
        );
    }

    #[test]
    fn words() {
        let g = grammars::words().unwrap();
        check(
            &g,
            &["one", "one two\nthree\n", "  padded  "],
            &[],
            &["", "one 2"],
        );

        let result = g
            .parse("one 2")
            .unwrap();
        assert_eq!(
            result
                .errors
                .len(),
            1
        );
        assert_eq!(result.errors[0].expected, "EOS");
    }
}
