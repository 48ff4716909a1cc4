mod common;

use std::path::PathBuf;

use common::{GoTree, sample_tree};
use interfacer::parser::ast::TypeExpr;
use interfacer::{Error, Interfacer};

#[test]
fn type_spec_returns_module_and_declaration() {
    let tree = sample_tree();
    let (module, spec) = tree.interfacer().type_spec("pkg", "Handler").unwrap();
    assert_eq!(module.path, "pkg");
    assert_eq!(module.name, "pkg");
    assert_eq!(module.dir, tree.path("src/pkg"));
    assert_eq!(spec.name.node, "Handler");
    assert!(matches!(spec.ty.node, TypeExpr::Interface(_)));
}

#[test]
fn full_type_qualifies_array_lengths() {
    let tree = GoTree::new();
    tree.file("arr/arr.go", "package arr\n\nconst Size = 4\n\ntype Block [2 * Size]Word\n\ntype Wide [Size * 2]Word\n");
    let interfacer = tree.interfacer();
    let (module, spec) = interfacer.type_spec("arr", "Block").unwrap();
    assert_eq!(module.full_type(&spec.ty, &[]), "[2 * arr.Size]arr.Word");
    let (module, spec) = interfacer.type_spec("arr", "Wide").unwrap();
    assert!(spec.type_params.is_empty());
    assert_eq!(module.full_type(&spec.ty, &[]), "[arr.Size * 2]arr.Word");
}

#[test]
fn build_constraints_in_file_names_are_honoured() {
    let tree = GoTree::new();
    tree.file("sys/sys.go", "package sys\n\ntype Common interface{ Fd() uintptr }\n");
    tree.file("sys/sys_windows.go", "package sys\n\ntype Handle interface{ Close() error }\n");
    tree.file("sys/sys_linux_amd64.go", "package sys\n\ntype Epoll interface{ Wait() error }\n");
    tree.file("sys/sys_test.go", "package sys\n\ntype Fake interface{}\n");

    let interfacer = tree.interfacer();
    assert!(interfacer.type_spec("sys", "Common").is_ok());
    assert!(interfacer.type_spec("sys", "Epoll").is_ok());
    assert!(matches!(interfacer.type_spec("sys", "Handle"), Err(Error::SymbolNotFound { .. })));
    assert!(matches!(interfacer.type_spec("sys", "Fake"), Err(Error::SymbolNotFound { .. })));

    let mut config = tree.config();
    config.goos = "windows".to_string();
    let windows = Interfacer::from_config(&config);
    assert!(windows.type_spec("sys", "Handle").is_ok());
    assert!(matches!(windows.type_spec("sys", "Epoll"), Err(Error::SymbolNotFound { .. })));
}

#[test]
fn go_build_lines_are_honoured() {
    let tree = GoTree::new();
    tree.file("sys/gen.go", "//go:build ignore\n\npackage main\n\ntype Common interface{ Generated() }\n");
    tree.file("sys/poll.go", "//go:build unix && !cgo\n\npackage sys\n\ntype Poller interface{ Wait() error }\n");
    tree.file("sys/sys.go", "package sys\n\ntype Common interface{ Fd() uintptr }\n");

    let interfacer = tree.interfacer();
    let (module, spec) = interfacer.type_spec("sys", "Common").unwrap();
    assert_eq!(module.name, "sys");
    assert!(module.location(spec.name.span).unwrap().ends_with("sys.go:3:6"));
    assert!(interfacer.type_spec("sys", "Poller").is_ok());

    let mut config = tree.config();
    config.goos = "windows".to_string();
    let windows = Interfacer::from_config(&config);
    assert!(matches!(windows.type_spec("sys", "Poller"), Err(Error::SymbolNotFound { .. })));
}

#[test]
fn goroot_wins_over_gopath() {
    let tree = GoTree::new();
    tree.write("goroot/src/dup/dup.go", "package dup\n\ntype T interface{ FromRoot() }\n");
    tree.write("gopath/src/dup/dup.go", "package dup\n\ntype T interface{ FromPath() }\n");
    tree.write("gopath/src/only/only.go", "package only\n\ntype U interface{ M() }\n");

    let mut config = tree.config();
    config.goroot = Some(tree.path("goroot"));
    config.gopath = vec![tree.path("gopath")];
    let interfacer = Interfacer::from_config(&config);

    let (module, _) = interfacer.type_spec("dup", "T").unwrap();
    assert_eq!(module.dir, tree.path("goroot/src/dup"));
    let (module, _) = interfacer.type_spec("only", "U").unwrap();
    assert_eq!(module.dir, tree.path("gopath/src/only"));
}

#[test]
fn vendored_packages_are_found() {
    let tree = GoTree::new();
    tree.file(
        "vendor/golang.org/x/net/http2/hpack/hpack.go",
        "package hpack\n\ntype Emitter interface{ Emit(name string) }\n",
    );
    let (module, _) = tree.interfacer().type_spec("golang.org/x/net/http2/hpack", "Emitter").unwrap();
    assert_eq!(module.name, "hpack");
}

#[test]
fn module_replacement_maps_prefix_to_directory() {
    let tree = GoTree::new();
    tree.write("work/widgets/gears/gears.go", "package gears\n\ntype Gear interface{ Turn() }\n");
    let mut config = tree.config();
    config.modules.insert("example.com/widgets".to_string(), tree.path("work/widgets"));
    let interfacer = Interfacer::from_config(&config);

    let (module, _) = interfacer.type_spec("example.com/widgets/gears", "Gear").unwrap();
    assert_eq!(module.path, "example.com/widgets/gears");
    assert_eq!(module.dir, tree.path("work/widgets/gears"));
}

#[test]
fn missing_package_is_module_not_found() {
    let tree = GoTree::new();
    let err = tree.interfacer().type_spec("does/not/exist", "T").unwrap_err();
    match err {
        Error::ModuleNotFound { path, reason } => {
            assert_eq!(path, "does/not/exist");
            assert!(reason.contains(&PathBuf::from("src").join("does/not/exist").display().to_string()));
        }
        other => panic!("expected ModuleNotFound, got {other}"),
    }
}

#[test]
fn generic_declarations_and_function_bodies_parse() {
    let tree = GoTree::new();
    tree.file(
        "gen/gen.go",
        r#"package gen

import (
	"fmt"
	str "strings"
)

type Number interface {
	~int | ~int64 | ~float64
}

type Stack[T any] struct {
	items []T
}

func (s *Stack[T]) Push(v T) {
	s.items = append(s.items, v)
	if len(s.items) > 10 {
		fmt.Println(str.Repeat("!", 3))
	}
}

var defaultStack = &Stack[int]{items: []int{1, 2, 3}}

type Visitor[T any] interface {
	Visit(node T) (next Visitor[T], err error)
}
"#,
    );
    let (module, spec) = tree.interfacer().type_spec("gen", "Visitor").unwrap();
    let scope: Vec<String> = spec.type_param_names().map(str::to_string).collect();
    let TypeExpr::Interface(iface) = &spec.ty.node else { panic!("expected interface") };
    let Some(elems) = &iface.methods else { panic!("expected elements") };
    let interfacer::parser::ast::InterfaceElem::Method(visit) = &elems[0] else { panic!("expected method") };
    let results = module.param_list(&visit.sig.results, &scope);
    assert_eq!(results[0].ty, "gen.Visitor[T]");
    assert_eq!(results[1].ty, "error");
}
