#[cfg(test)]
mod errors {
    use grammy::language::*;
    use grammy::parsing::*;

    fn grammar() -> Grammar {
        Grammar::define("simple")
            .helper("lower", 'a'..='z')
            .start(
                "string",
                (reference("lower") >> reference("lower")) & (reference("lower") >> reference("lower")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn cut_is_on_third_element() {
        let g = grammar();
        let string = g
            .rule("string")
            .unwrap();

        assert_eq!(
            string
                .children()
                .len(),
            4
        );
        assert!(!string.children()[2].is_backtracking());
        assert_eq!(string.to_string(), ":lower >> :lower & :lower >> :lower");
    }

    #[test]
    fn failure_before_cut_is_silent() {
        let result = grammar()
            .parse("a1aa")
            .unwrap();

        assert!(result.is_no_match());
        assert!(result
            .errors
            .is_empty());
    }

    #[test]
    fn failure_at_cut_is_recorded() {
        let result = grammar()
            .parse("aa1a")
            .unwrap();

        assert!(result.is_no_match());
        assert_eq!(
            result
                .errors
                .len(),
            1
        );

        let error = &result.errors[0];
        assert_eq!(error.line_number, 1);
        assert_eq!(error.column, 3);
        assert_eq!(error.line_text, "aa1a");
        assert_eq!(error.expected, "lower");
        assert_eq!(error.enclosing_rule, "string");
        assert_eq!(error.enclosing_notation, "lower lower lower lower");
    }

    #[test]
    fn failure_after_cut_is_recorded() {
        let result = grammar()
            .parse("aaa3")
            .unwrap();

        assert!(result.is_no_match());
        assert_eq!(
            result
                .errors
                .len(),
            1
        );
        assert_eq!(result.errors[0].column, 4);
    }

    #[test]
    fn success_records_nothing() {
        let result = grammar()
            .parse("abcd")
            .unwrap();

        assert!(result.is_full());
        assert!(result
            .errors
            .is_empty());
    }

    #[test]
    fn hard_failure_is_reported_once() {
        let g = Grammar::define("nested")
            .token("digit", '0'..='9')
            .rule("pair", literal("(") & reference("digit") >> ")")
            .start("pairs", reference("pair").one_or_more())
            .build()
            .unwrap();

        let result = g
            .parse("(1)(x)")
            .unwrap();

        assert!(result.is_no_match());
        assert_eq!(
            result
                .errors
                .len(),
            1
        );

        let error = &result.errors[0];
        assert_eq!(error.enclosing_rule, "pair");
        assert_eq!(error.expected, "digit");
        assert_eq!(error.column, 5);
    }

    #[test]
    fn errors_track_lines() {
        let g = Grammar::define("lines")
            .default_skipper("ws", (literal(" ") | "\n").one_or_more())
            .token("word", range('a', 'z').one_or_more())
            .start("text", reference("word").one_or_more() & eos())
            .build()
            .unwrap();

        let result = g
            .parse_with(
                "one two\nthree 4our\n",
                &ParseOptions::default().source_name("text.txt"),
            )
            .unwrap();

        assert!(result.is_no_match());
        assert_eq!(
            result
                .errors
                .len(),
            1
        );

        let error = &result.errors[0];
        assert_eq!(error.source_name, "text.txt");
        assert_eq!(error.line_number, 2);
        assert_eq!(error.line_text, "three 4our");
        assert_eq!(error.column, 7);
        assert_eq!(error.expected, "EOS");
        assert_eq!(error.enclosing_rule, "text");

        let report = error.to_string();
        assert!(report.starts_with("SyntaxError\n| in source 'text.txt'\n| in line 2 at column 7\n"));
        assert!(report.contains("| Expected: EOS\n"));
        assert!(report.contains("| In Rule: text -> word+ EOS\n"));
    }
}
