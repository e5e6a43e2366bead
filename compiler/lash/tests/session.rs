//! End-to-end behaviour of a shell session: source text in, values out.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lash::Session;
use lash_eval::host::OsHandler;
use lash_eval::{buffer_handler, Value};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A host with no environment variables and nothing on the `PATH`.
struct BareOs;

impl OsHandler for BareOs {
    fn load_env(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn path_var(&self) -> String {
        String::new()
    }

    fn scan_path(&self, _path: &str) -> Vec<(String, PathBuf)> {
        Vec::new()
    }
}

fn session_in(dir: &Path) -> Session {
    Session::builder()
        .os(Rc::new(BareOs))
        .print_handler(buffer_handler())
        .cwd(dir)
        .build()
}

struct Fixture {
    dir: TempDir,
    session: Session,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let session = session_in(dir.path());
        Fixture { dir, session }
    }

    fn write(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, source).unwrap();
        path
    }

    /// Evaluate a line and return what it produced, `null` included.
    fn line(&self, source: &str) -> Value {
        self.session
            .eval_line(source)
            .unwrap()
            .map_or(Value::Null, |(_, value)| value)
    }

    fn render(&self, source: &str) -> String {
        self.line(source).to_string()
    }

    fn error(&self, source: &str) -> String {
        self.session.eval_line(source).unwrap_err().message
    }

    fn output(&self) -> String {
        self.session.print_handler().get_output()
    }
}

#[test]
fn literal_forms_evaluate_to_themselves() {
    let f = Fixture::new();
    assert_eq!(f.line("42"), Value::Number(42.0));
    assert_eq!(f.line("4.5"), Value::Number(4.5));
    assert_eq!(f.line(r#""text""#), Value::from("text"));
    assert_eq!(f.line("true"), Value::Bool(true));
    assert_eq!(f.line("null"), Value::Null);
    assert_eq!(f.line("(do word)"), Value::from("word"));
}

#[test]
fn interpolation_equals_concatenation() {
    let f = Fixture::new();
    f.line("def $x 5");
    assert_eq!(f.line(r#""a${x}b""#), f.line(r#"& "a" $x "b""#));
    assert_eq!(f.line(r#""a${x}b""#), Value::from("a5b"));
}

#[test]
fn short_circuits_skip_the_throw() {
    let f = Fixture::new();
    assert_eq!(f.line(r#"(if false (throw "boom") 1)"#), Value::Number(1.0));
    assert_eq!(f.line(r#"(and false (throw "x"))"#), Value::Bool(false));
}

#[test]
fn map_literals() {
    let f = Fixture::new();
    assert_eq!(f.render("{1 2 3 4}"), "{1 2 3 4}");
    f.line("def $x 3");
    assert_eq!(f.render("{1 2 $x 4}"), "{1 2 3 4}");
    assert_eq!(
        f.error("{1 2 3}"),
        "Map literal must have an even number of values to form key -> value pairs!"
    );
}

#[test]
fn let_bindings_see_earlier_bindings() {
    let f = Fixture::new();
    assert_eq!(f.line("(let {$a 1 $b (+ $a 1)} $b)"), Value::Number(2.0));
    assert!(f.error("$a").contains("Undefined variable a"));
}

#[test]
fn finally_runs_once_when_catch_throws() {
    let f = Fixture::new();
    f.line("def $count 0");
    let message = f.error(
        r#"(try (throw "body") (catch $e (throw (& "caught " (map/get $e message)))) (finally (def $count (+ $count 1))))"#,
    );
    assert_eq!(message, "caught body");
    assert_eq!(f.line("$count"), Value::Number(1.0));
}

#[test]
fn import_modes_bind_what_they_select() {
    let f = Fixture::new();
    f.write(
        "lib.lash",
        "(export $foo 1)\n(export $bar 2)\n(def $hidden 3)",
    );

    let wildcard = Fixture::new();
    wildcard.write("lib.lash", "(export $foo 1) (export $bar 2)");
    wildcard.line(r#"import * "./lib.lash""#);
    assert_eq!(wildcard.line("$foo"), Value::Number(1.0));
    assert_eq!(wildcard.line("$bar"), Value::Number(2.0));

    f.line(r#"import ns "./lib.lash""#);
    assert_eq!(f.line("$ns/foo"), Value::Number(1.0));
    assert_eq!(f.line("$ns/bar"), Value::Number(2.0));
    assert!(f.session.eval_line("$foo").is_err());

    f.line(r#"import [foo] "./lib.lash""#);
    assert_eq!(f.line("$foo"), Value::Number(1.0));
    assert!(f.session.eval_line("$bar").is_err());

    assert_eq!(
        f.error(r#"import [hidden] "./lib.lash""#),
        "Cannot import hidden as it is not exported"
    );
}

#[test]
fn nested_imports_resolve_relative_to_their_file() {
    let f = Fixture::new();
    f.write("lib/inner.lash", "(export $value 7)");
    f.write(
        "lib/outer.lash",
        r#"(import [value] "./inner.lash") (export $doubled (* $value 2))"#,
    );
    f.line(r#"import * "./lib/outer.lash""#);
    assert_eq!(f.line("$doubled"), Value::Number(14.0));
}

#[test]
fn library_errors_reach_the_importer() {
    let f = Fixture::new();
    f.write("broken.lash", r#"(throw "library failed")"#);
    assert_eq!(
        f.line(r#"(try (import * "./broken.lash") (catch $e (map/get $e message)))"#),
        Value::from("library failed")
    );
    f.write("unparsable.lash", "(def $x");
    let err = f.session.eval_line(r#"import * "./unparsable.lash""#).unwrap_err();
    assert!(err.location.file.ends_with("unparsable.lash"));
}

#[test]
fn scoped_cd_restores_the_directory_after_a_failure() {
    let f = Fixture::new();
    fs::create_dir(f.dir.path().join("sub")).unwrap();
    let before = f.session.cwd();
    assert_eq!(f.error(r#"(cd "sub" (throw "inside"))"#), "inside");
    assert_eq!(f.session.cwd(), before);

    assert_eq!(f.render(r#"(cd "sub" $cwd)"#), before.join("sub").to_string_lossy());
    f.line(r#"cd "sub""#);
    assert_eq!(f.session.cwd(), before.join("sub"));
}

#[test]
fn builtins_validate_their_arguments() {
    let f = Fixture::new();
    f.line("def $lst [1 2 3]");
    assert_eq!(
        f.error("(list/get $lst)"),
        "list/get expected exactly two arguments, a list and an index"
    );
    assert_eq!(
        f.error(r#"(list/get "notalist" 0)"#),
        "list/get expected first argument to be a list"
    );
}

#[test]
fn results_are_numbered() {
    let f = Fixture::new();
    assert_eq!(
        f.session.eval_line("(+ 1 2)").unwrap(),
        Some(("result0".to_string(), Value::Number(3.0)))
    );
    assert_eq!(f.session.eval_line("null").unwrap(), None);
    assert_eq!(f.session.eval_line(r#""""#).unwrap(), None);
    assert_eq!(
        f.session.eval_line("(* $result0 2)").unwrap(),
        Some(("result1".to_string(), Value::Number(6.0)))
    );
}

#[test]
fn blank_lines_do_nothing() {
    let f = Fixture::new();
    assert_eq!(f.session.eval_line("   ").unwrap(), None);
}

#[test]
fn exit_stops_the_session() {
    let f = Fixture::new();
    assert!(!f.session.exit_requested());
    f.line("exit");
    assert!(f.session.exit_requested());
}

#[test]
fn echo_writes_through_the_print_handler() {
    let f = Fixture::new();
    f.line(r#"echo "hello" 42"#);
    assert_eq!(f.output(), "hello 42\n");
}

#[test]
fn files_run_at_the_top_level() {
    let f = Fixture::new();
    f.write("script.lash", "(defn $twice [$n] (* $n 2))\n(def $answer (twice 21))");
    let last = f.session.run_file(Path::new("script.lash")).unwrap();
    assert_eq!(last, Value::Number(42.0));
    assert_eq!(f.line("$answer"), Value::Number(42.0));
    assert_eq!(f.line("twice 2"), Value::Number(4.0));
}

#[cfg(unix)]
#[test]
fn execute_runs_real_programs() {
    let f = Fixture::new();
    f.line(r#"export $GREETING "hi there""#);
    f.line(r#"def $r (execute "/bin/sh" ["-c" "echo \$GREETING; pwd; exit 2"])"#);
    let cwd = f.session.cwd();
    assert_eq!(
        f.line("map/get $r stdout"),
        Value::from(format!("hi there\n{}\n", cwd.display()))
    );
    assert_eq!(f.line("map/get $r errCode"), Value::Number(2.0));
    assert_eq!(f.line("map/get $r stderr"), Value::Null);
}

#[cfg(unix)]
#[test]
fn path_executables_become_functions() {
    use std::os::unix::fs::PermissionsExt;

    let f = Fixture::new();
    let bin = f.dir.path().join("bin");
    fs::create_dir(&bin).unwrap();
    let script = bin.join("hello");
    fs::write(&script, "#!/bin/sh\necho \"hello $1\"\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let session = Session::builder()
        .os(Rc::new(lash::os::NixOs))
        .print_handler(buffer_handler())
        .cwd(f.dir.path())
        .build();
    session
        .eval_line(&format!(r#"export $PATH "{}""#, bin.display()))
        .unwrap();
    let (_, value) = session.eval_line("hello world").unwrap().unwrap();
    assert_eq!(value, Value::from("hello world\n"));
}
