#[cfg(test)]
mod ast {
    use grammy::language::*;

    fn lowercase() -> GrammarBuilder {
        Grammar::define("simple").helper("lower", 'a'..='z')
    }

    #[test]
    fn constant_repetition() {
        let g = lowercase()
            .start("string", reference("lower").times(4))
            .build()
            .unwrap();

        let tree = g
            .parse("some")
            .unwrap()
            .ast
            .unwrap();

        assert_eq!(tree.data(), "some");
        assert_eq!(tree.to_tree_string(), "string{'some'}\n");
        assert!(tree
            .children()
            .is_empty());
    }

    #[test]
    fn sequence_range() {
        let g = lowercase()
            .start(
                "string",
                reference("lower").times(3) >> reference("lower"),
            )
            .build()
            .unwrap();

        let tree = g
            .parse("some")
            .unwrap()
            .ast
            .unwrap();

        assert_eq!(tree.data(), "some");
        assert_eq!(tree.range(), 0..4);
    }

    #[test]
    fn helper_nodes_are_removed() {
        let g = Grammar::define("simple")
            .helper("lower", 'a'..='z')
            .helper("upper", 'A'..='Z')
            .helper("letter", reference("lower") | reference("upper"))
            .helper("ident_start", reference("letter") | "_")
            .helper("ident_letter", reference("ident_start") | ('0'..='9'))
            .start(
                "ident",
                reference("ident_start") >> reference("ident_letter").zero_or_more(),
            )
            .build()
            .unwrap();

        let tree = g
            .parse("some_id0")
            .unwrap()
            .ast
            .unwrap();

        assert_eq!(tree.to_tree_string(), "ident{'some_id0'}\n");
    }

    #[test]
    fn only_helper_nodes_are_removed() {
        let g = Grammar::define("simple")
            .rule("id", range('a', 'z').repeat(1, 10))
            .helper("part", reference("id") >> ":" >> reference("id"))
            .rule("sent", reference("part") >> ".")
            .start("start", reference("sent").repeat(1, 3))
            .build()
            .unwrap();

        let tree = g
            .parse("ab:ac.kk:ee.")
            .unwrap()
            .ast
            .unwrap();

        assert_eq!(tree.data(), "ab:ac.kk:ee.");
        assert_eq!(
            tree.to_tree_string(),
            r#"start{
  sent{
    id{'ab'}
    id{'ac'}
  }
  sent{
    id{'kk'}
    id{'ee'}
  }
}
"#
        );

        let sentences = tree.get_children("sent");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].data(), "ab:ac.");
        assert_eq!(sentences[1].data(), "kk:ee.");
    }

    #[test]
    fn walking_the_tree() {
        let g = Grammar::define("simple")
            .rule("id", range('a', 'z').repeat(1, 10))
            .helper("part", reference("id") >> ":" >> reference("id"))
            .rule("sent", reference("part") >> ".")
            .start("start", reference("sent").repeat(1, 3))
            .build()
            .unwrap();

        let result = g
            .parse("ab:ac.kk:ee.")
            .unwrap();
        let tree = result
            .ast
            .unwrap();

        let walker = Walker::new()
            .before("sent", |pairs: &mut Vec<Vec<String>>, _| pairs.push(Vec::new()))
            .after("id", |pairs: &mut Vec<Vec<String>>, node| {
                if let Some(current) = pairs.last_mut() {
                    current.push(node.data().to_string());
                }
            });

        let mut pairs = Vec::new();
        walker.walk(&tree, &mut pairs);

        assert_eq!(
            pairs,
            vec![
                vec!["ab".to_string(), "ac".to_string()],
                vec!["kk".to_string(), "ee".to_string()]
            ]
        );
    }
}
