#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use interfacer::config::Strategy;
use interfacer::{Config, Interfacer};
use tempfile::TempDir;

pub fn interfacer_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_interfacer"))
}

/// A throwaway GOROOT. Files are written under `src/`.
pub struct GoTree {
    dir: TempDir,
}

impl GoTree {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `src/<rel>`.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        self.write(&format!("src/{rel}"), content)
    }

    /// Write `content` to `<rel>`, relative to the tree root.
    pub fn write(&self, rel: &str, content: &str) -> &Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        self
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Linux/amd64 config with this tree as GOROOT and no GOPATH.
    pub fn config(&self) -> Config {
        Config {
            goroot: Some(self.dir.path().to_path_buf()),
            gopath: Vec::new(),
            goos: "linux".to_string(),
            goarch: "amd64".to_string(),
            ..Config::default()
        }
    }

    pub fn interfacer(&self) -> Interfacer {
        Interfacer::from_config(&self.config())
    }

    pub fn index_interfacer(&self, imports: &[(&str, &str)]) -> Interfacer {
        let mut config = self.config();
        config.resolver = Strategy::Index;
        for (qualifier, path) in imports {
            config.imports.insert(qualifier.to_string(), path.to_string());
        }
        Interfacer::from_config(&config)
    }
}

/// The `pkg` package used across tests.
pub fn sample_tree() -> GoTree {
    let tree = GoTree::new();
    tree.file(
        "pkg/io.go",
        r#"// Package pkg is a small stand-in for io and net/http.
package pkg

import "time"

type Reader interface {
	Read(p []byte) (n int, err error)
}

type Writer interface {
	Write(p []byte) (n int, err error)
}

type Closer interface {
	Close() error
}

type ReadWriter interface {
	Read(p []byte) (n int, err error)
	Write(p []byte) (n int, err error)
}

type ReadCloser interface {
	Reader
	Closer
}

type Deadline interface {
	SetDeadline(t time.Time) error
}
"#,
    );
    tree.file(
        "pkg/http.go",
        r#"package pkg

type Header map[string][]string

type Request struct {
	Method string
	Header Header
}

type ResponseWriter interface {
	Header() Header
	Write([]byte) (int, error)
	WriteHeader(statusCode int)
}

type Handler interface {
	Serve(ResponseWriter, *Request)
}

func NewRequest(method string) *Request {
	return &Request{Method: method}
}
"#,
    );
    tree.file("time/time.go", "package time\n\ntype Time struct{ wall uint64 }\n\ntype Duration int64\n");
    tree
}
