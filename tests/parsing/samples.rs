#[cfg(test)]
mod samples {
    use std::fs;
    use std::path::{Path, PathBuf};

    use grammy::grammars;
    use grammy::parsing::{self, ParseOptions};

    /// Every `.txt` file in each per-grammar subdirectory of `dir`, along with
    /// the name of the grammar it belongs to.
    fn collect(dir: &Path) -> Vec<(String, PathBuf)> {
        assert!(dir.exists(), "{:?} directory missing", dir);

        let mut files = Vec::new();

        let entries = fs::read_dir(dir).expect("Failed to read directory");
        for entry in entries {
            let entry = entry.expect("Failed to read directory entry");
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let grammar = path
                .file_name()
                .and_then(|s| s.to_str())
                .expect("Directory name is not valid UTF-8")
                .to_string();

            let inner = fs::read_dir(&path).expect("Failed to read grammar directory");
            for entry in inner {
                let entry = entry.expect("Failed to read directory entry");
                let file = entry.path();

                if file
                    .extension()
                    .and_then(|s| s.to_str())
                    == Some("txt")
                {
                    files.push((grammar.clone(), file));
                }
            }
        }

        files
    }

    #[test]
    fn ensure_samples_parse() {
        let files = collect(Path::new("tests/samples/"));

        assert!(!files.is_empty(), "No .txt files found in samples directory");

        let mut failures = Vec::new();

        for (name, file) in &files {
            let grammar = grammars::by_name(name)
                .unwrap_or_else(|| panic!("No bundled grammar named '{}'", name))
                .unwrap();

            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let options = ParseOptions::default().source_name(&file.to_string_lossy());
            let result = grammar
                .parse_with(&content, &options)
                .unwrap();

            if !result.is_full() {
                println!(
                    "File {:?} failed to parse: {:?}, {:?}",
                    file, result.classification, result.errors
                );
                failures.push(file.clone());
            }
        }

        if !failures.is_empty() {
            panic!(
                "Sample files should parse successfully, but {} files failed",
                failures.len()
            );
        }
    }

    #[test]
    fn ensure_broken_fail() {
        let files = collect(Path::new("tests/broken/"));

        assert!(!files.is_empty(), "No .txt files found in broken directory");

        let mut unexpected_successes = Vec::new();

        for (name, file) in &files {
            let grammar = grammars::by_name(name)
                .unwrap_or_else(|| panic!("No bundled grammar named '{}'", name))
                .unwrap();

            let content = parsing::load(&file)
                .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

            let result = grammar
                .parse(&content)
                .unwrap();

            if result.is_full() {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
        }

        if !unexpected_successes.is_empty() {
            panic!(
                "Broken files should not to parse successfully, but {} files passed",
                unexpected_successes.len()
            );
        }
    }
}
