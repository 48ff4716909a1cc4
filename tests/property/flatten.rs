// Property tests for reference handling and flattening:
// 1. Any reference containing whitespace between tokens is malformed
// 2. Flattening is deterministic across calls
// 3. N direct methods flatten to N signatures in declaration order

use std::path::Path;

use interfacer::config::Config;
use interfacer::{Error, Interfacer};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,8}"
}

fn config(root: &Path) -> Config {
    Config {
        goroot: Some(root.to_path_buf()),
        gopath: Vec::new(),
        goos: "linux".to_string(),
        goarch: "amd64".to_string(),
        ..Config::default()
    }
}

fn write_package(root: &Path, methods: &[String]) {
    let dir = root.join("src/gen");
    std::fs::create_dir_all(&dir).unwrap();
    let body: String = methods.iter().map(|m| format!("\t{m}(x int) error\n")).collect();
    let source = format!("package gen\n\ntype Base interface {{\n\tBaseMethod()\n}}\n\ntype Iface interface {{\n\tBase\n{body}}}\n");
    std::fs::write(dir.join("gen.go"), source).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn whitespace_separated_tokens_are_malformed(
        parts in prop::collection::vec("[a-zA-Z.+*]{1,6}", 2..5),
        sep in "[ \t\n]{1,3}",
    ) {
        let tree = tempfile::tempdir().unwrap();
        let interfacer = Interfacer::from_config(&config(tree.path()));
        let reference = parts.join(&sep);
        let err = interfacer.functions(&reference).unwrap_err();
        prop_assert!(matches!(err, Error::MalformedReference { .. }), "{reference:?}: {err}");
    }

    #[test]
    fn flatten_is_deterministic_and_ordered(methods in prop::collection::btree_set(ident(), 0..6)) {
        let methods: Vec<String> = methods.into_iter().filter(|m| m != "BaseMethod").collect();
        let tree = tempfile::tempdir().unwrap();
        write_package(tree.path(), &methods);
        let interfacer = Interfacer::from_config(&config(tree.path()));

        let first = interfacer.functions("gen.Iface").unwrap();
        let second = interfacer.functions("gen.Iface").unwrap();
        prop_assert_eq!(&first, &second);

        let names: Vec<&str> = first.iter().map(|f| f.name.as_str()).collect();
        let mut expected = vec!["BaseMethod"];
        expected.extend(methods.iter().map(String::as_str));
        prop_assert_eq!(names, expected);
        prop_assert!(first[1..].iter().all(|f| f.res.len() == 1 && f.res[0].ty == "error"));
    }
}
