mod common;

use common::{GoTree, sample_tree};
use interfacer::{Error, Func, Param};

fn names(funcs: &[Func]) -> Vec<&str> {
    funcs.iter().map(|f| f.name.as_str()).collect()
}

fn lines(funcs: &[Func]) -> Vec<String> {
    funcs.iter().map(Func::to_string).collect()
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn read_writer_keeps_builtin_types() {
    let tree = sample_tree();
    let funcs = tree.interfacer().functions("pkg.ReadWriter").unwrap();
    assert_eq!(
        funcs,
        vec![
            Func {
                name: "Read".to_string(),
                params: vec![Param::new("p", "[]byte")],
                res: vec![Param::new("n", "int"), Param::new("err", "error")],
            },
            Func {
                name: "Write".to_string(),
                params: vec![Param::new("p", "[]byte")],
                res: vec![Param::new("n", "int"), Param::new("err", "error")],
            },
        ]
    );
}

#[test]
fn handler_params_are_unnamed_and_qualified() {
    let tree = sample_tree();
    let funcs = tree.interfacer().functions("pkg.Handler").unwrap();
    assert_eq!(funcs.len(), 1);
    assert_eq!(funcs[0].name, "Serve");
    assert_eq!(funcs[0].params, vec![Param::new("", "pkg.ResponseWriter"), Param::new("", "*pkg.Request")]);
    assert!(funcs[0].res.is_empty());
}

#[test]
fn missing_symbol_names_ident_and_package() {
    let tree = sample_tree();
    let err = tree.interfacer().functions("pkg.Nonexistent").unwrap_err();
    match err {
        Error::SymbolNotFound { ident, path } => {
            assert_eq!(ident, "Nonexistent");
            assert_eq!(path, "pkg");
        }
        other => panic!("expected SymbolNotFound, got {other}"),
    }
}

#[test]
fn multi_token_reference_is_malformed() {
    let tree = sample_tree();
    let err = tree.interfacer().functions("a + b").unwrap_err();
    assert!(matches!(err, Error::MalformedReference { ref reference } if reference == "a + b"));
}

// ============================================================
// Embedding
// ============================================================

#[test]
fn embeds_splice_in_place() {
    let tree = sample_tree();
    let funcs = tree.interfacer().functions("pkg.ReadCloser").unwrap();
    assert_eq!(lines(&funcs), vec!["Read(p []byte) (n int, err error)", "Close() error"]);
}

#[test]
fn embedding_law() {
    let tree = sample_tree();
    tree.file(
        "law/law.go",
        "package law\n\ntype B interface {\n\tOne()\n\tTwo(x int) string\n}\n\ntype A interface {\n\tB\n\tThree()\n}\n",
    );
    let interfacer = tree.interfacer();
    let mut expected = interfacer.functions("law.B").unwrap();
    expected.push(Func { name: "Three".to_string(), params: Vec::new(), res: Vec::new() });
    assert_eq!(interfacer.functions("law.A").unwrap(), expected);
}

#[test]
fn duplicate_methods_are_kept() {
    let tree = sample_tree();
    tree.file(
        "dup/dup.go",
        "package dup\n\nimport \"pkg\"\n\ntype File interface {\n\tpkg.Closer\n\tpkg.ReadCloser\n}\n",
    );
    let funcs = tree.interfacer().functions("dup.File").unwrap();
    assert_eq!(names(&funcs), vec!["Close", "Read", "Close"]);
}

#[test]
fn diamond_embedding_expands_twice() {
    let tree = GoTree::new();
    tree.file(
        "d/d.go",
        "package d\n\ntype Base interface{ Ping() }\ntype Left interface{ Base }\ntype Right interface{ Base }\ntype Both interface {\n\tLeft\n\tRight\n}\n",
    );
    let funcs = tree.interfacer().functions("d.Both").unwrap();
    assert_eq!(names(&funcs), vec!["Ping", "Ping"]);
}

#[test]
fn cross_package_selector_embeds() {
    let tree = sample_tree();
    tree.file(
        "net/conn.go",
        "package net\n\nimport \"pkg\"\n\ntype Conn interface {\n\tpkg.ReadWriter\n\tpkg.Deadline\n\tLocalAddr() Addr\n}\n\ntype Addr interface{ Network() string }\n",
    );
    let funcs = tree.interfacer().functions("net.Conn").unwrap();
    assert_eq!(
        lines(&funcs),
        vec![
            "Read(p []byte) (n int, err error)",
            "Write(p []byte) (n int, err error)",
            "SetDeadline(t time.Time) error",
            "LocalAddr() net.Addr",
        ]
    );
}

#[test]
fn self_embedding_is_cyclic() {
    let tree = GoTree::new();
    tree.file("c/c.go", "package c\n\ntype Self interface {\n\tSelf\n}\n");
    let err = tree.interfacer().functions("c.Self").unwrap_err();
    assert!(matches!(err, Error::CyclicEmbedding { .. }), "{err}");
}

#[test]
fn mutual_embedding_is_cyclic() {
    let tree = GoTree::new();
    tree.file("a/a.go", "package a\n\nimport \"b\"\n\ntype A interface {\n\tb.B\n\tFromA()\n}\n");
    tree.file("b/b.go", "package b\n\nimport \"a\"\n\ntype B interface {\n\ta.A\n\tFromB()\n}\n");
    let err = tree.interfacer().functions("a.A").unwrap_err();
    let Error::CyclicEmbedding { chain } = err else { panic!("expected cycle, got {err}") };
    assert_eq!(chain, vec!["a.A", "b.B", "a.A"]);
    assert_eq!(
        Error::CyclicEmbedding { chain }.to_string(),
        "cyclic embedding: a.A -> b.B -> a.A"
    );
}

#[test]
fn embedded_failure_aborts_whole_call() {
    let tree = GoTree::new();
    tree.file("e/e.go", "package e\n\ntype Outer interface {\n\tFirst()\n\tMissing\n}\n");
    let err = tree.interfacer().functions("e.Outer").unwrap_err();
    assert!(matches!(err, Error::SymbolNotFound { ref ident, .. } if ident == "Missing"));
}

// ============================================================
// Behaviour across calls and configurations
// ============================================================

#[test]
fn repeated_calls_are_identical() {
    let tree = sample_tree();
    let interfacer = tree.interfacer();
    let first = interfacer.functions("pkg.ReadCloser").unwrap();
    let second = interfacer.functions("pkg.ReadCloser").unwrap();
    assert_eq!(first, second);
}

#[test]
fn cache_does_not_change_results() {
    let tree = sample_tree();
    let cached = tree.interfacer().functions("pkg.ReadCloser").unwrap();
    let uncached = tree.interfacer().with_cache(false).functions("pkg.ReadCloser").unwrap();
    assert_eq!(cached, uncached);
}

#[test]
fn index_resolver_uses_configured_imports() {
    let tree = sample_tree();
    tree.file("example.com/widgets/w.go", "package gadgets\n\ntype Widget interface{ Spin(speed int) }\n");
    let interfacer = tree.index_interfacer(&[("pkg", "pkg"), ("gadgets", "example.com/widgets")]);
    assert_eq!(names(&interfacer.functions("pkg.ReadCloser").unwrap()), vec!["Read", "Close"]);
    assert_eq!(lines(&interfacer.functions("gadgets.Widget").unwrap()), vec!["Spin(speed int)"]);
}

#[test]
fn skipped_files_are_reported() {
    let tree = sample_tree();
    tree.file("pkg/aaa_broken.go", "package pkg\n\ntype Broken interface {\n");
    let (result, skipped) = tree.interfacer().functions_with_diagnostics("pkg.Handler");
    assert_eq!(names(&result.unwrap()), vec!["Serve"]);
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].path.ends_with("aaa_broken.go"));
    assert!(skipped[0].to_string().contains("aaa_broken.go"));
}

#[test]
fn struct_reference_is_not_an_interface() {
    let tree = sample_tree();
    let err = tree.interfacer().functions("pkg.Request").unwrap_err();
    assert!(matches!(err, Error::NotAnInterface { ref reference } if reference == "pkg.Request"));
}

#[test]
fn array_length_constants_are_qualified() {
    let tree = GoTree::new();
    tree.file(
        "hashx/hashx.go",
        "package hashx\n\nconst Size = 32\n\ntype Hasher interface {\n\tSum() [Size]byte\n\tBlocks(n int) [][BlockSize / 8]uint64\n}\n",
    );
    let funcs = tree.interfacer().functions("hashx.Hasher").unwrap();
    assert_eq!(funcs[0].res, vec![Param::new("", "[hashx.Size]byte")]);
    assert_eq!(lines(&funcs), vec!["Sum() [hashx.Size]byte", "Blocks(n int) [][hashx.BlockSize / 8]uint64"]);
}

#[test]
fn generator_files_do_not_hide_the_package() {
    let tree = GoTree::new();
    tree.file("sort/gen_sort_variants.go", "//go:build ignore\n\npackage main\n\nfunc main() {}\n");
    tree.file("sort/sort.go", "package sort\n\ntype Interface interface {\n\tLen() int\n\tLess(i, j int) bool\n\tSwap(i, j int)\n}\n");
    let funcs = tree.interfacer().functions("sort.Interface").unwrap();
    assert_eq!(lines(&funcs), vec!["Len() int", "Less(i int, j int) bool", "Swap(i int, j int)"]);
}
