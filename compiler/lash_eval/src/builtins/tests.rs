#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use crate::test_support::Harness;
use crate::Value;

fn eval(source: &str) -> Value {
    Harness::new().eval(source).unwrap()
}

fn render(source: &str) -> String {
    eval(source).to_string()
}

fn error(source: &str) -> String {
    Harness::new().error(source).message
}

// Arguments

#[test]
fn arity_errors_name_the_builtin_and_its_arguments() {
    assert_eq!(
        error("(def $lst [1 2]) (list/get $lst)"),
        "list/get expected exactly two arguments, a list and an index"
    );
    assert_eq!(
        error("(map/set {})"),
        "map/set expected exactly three arguments, a map, a key and a value"
    );
    assert_eq!(error("(not)"), "not expected exactly one argument");
    assert_eq!(
        error("(seq/range 1 2 3)"),
        "seq/range expected between 0 and 2 arguments"
    );
}

#[test]
fn argument_kinds_are_checked() {
    assert_eq!(
        error(r#"(list/get "notalist" 0)"#),
        "list/get expected first argument to be a list"
    );
    assert_eq!(
        error(r#"(+ 1 "2")"#),
        "+ expected second argument to be a number"
    );
    assert_eq!(
        error("(list/map [1] 2)"),
        "list/map expected second argument to be a function"
    );
    assert_eq!(
        error("(list/map [1] $and)"),
        "list/map expected second argument to be a function"
    );
}

// Language

#[test]
fn do_returns_the_last_argument() {
    assert_eq!(eval("(do 1 2 3)"), Value::Number(3.0));
    assert_eq!(eval("(do)"), Value::Null);
}

#[test]
fn concatenation_renders_null_as_empty() {
    assert_eq!(eval(r#"(& "a" 1 null [1 "b"])"#), Value::from(r#"a1[1 "b"]"#));
}

#[test]
fn equality_is_structural() {
    assert_eq!(eval("(== [1 {a 2}] [1 {a 2}])"), Value::Bool(true));
    assert_eq!(eval("(== {a 1 b 2} {b 2 a 1})"), Value::Bool(true));
    assert_eq!(eval(r#"(!= 1 "1")"#), Value::Bool(true));
    assert_eq!(eval("(not null)"), Value::Bool(true));
    assert_eq!(eval("(not 0)"), Value::Bool(false));
}

#[test]
fn comparisons_order_numbers_and_strings() {
    assert_eq!(eval("(< 1 2)"), Value::Bool(true));
    assert_eq!(eval("(>= 2 2)"), Value::Bool(true));
    assert_eq!(eval(r#"(> "b" "a")"#), Value::Bool(true));
    assert_eq!(eval("(< null 1)"), Value::Bool(true));
    assert_eq!(
        error(r#"(< 1 "a")"#),
        "< expected two numbers or two strings but found number and string"
    );
}

#[test]
fn echo_joins_its_arguments() {
    let h = Harness::new();
    h.eval(r#"(echo "a" 1 [2 "b"])"#).unwrap();
    h.eval("(echo)").unwrap();
    assert_eq!(h.print.get_output(), "a 1 [2 \"b\"]\n\n");
}

#[test]
fn throw_uses_its_argument_as_the_message() {
    assert_eq!(error(r#"(throw "nope")"#), "nope");
    assert_eq!(error("(throw 12)"), "12");
}

#[test]
fn logic_macros_short_circuit() {
    assert_eq!(eval(r#"(and false (throw "boom"))"#), Value::Bool(false));
    assert_eq!(eval(r#"(or 1 (throw "boom"))"#), Value::Bool(true));
    assert_eq!(eval("(or null 0)"), Value::Number(0.0));
    assert_eq!(eval("(and 1 2)"), Value::Number(2.0));
}

// Math

#[test]
fn arithmetic() {
    assert_eq!(eval("(+ 1 2)"), Value::Number(3.0));
    assert_eq!(eval("(- 1 2)"), Value::Number(-1.0));
    assert_eq!(eval("(* 1.5 2)"), Value::Number(3.0));
    assert_eq!(eval("(/ 1 4)"), Value::Number(0.25));
    assert_eq!(eval("(neg 2)"), Value::Number(-2.0));
}

// Strings

#[test]
fn string_functions() {
    assert_eq!(eval(r#"(string/size "héllo")"#), Value::Number(5.0));
    assert_eq!(eval(r#"(string/contains "shell" "ell")"#), Value::Bool(true));
    assert_eq!(eval(r#"(string/startsWith "shell" "he")"#), Value::Bool(false));
    assert_eq!(eval(r#"(string/trim "  x \n")"#), Value::from("x"));
    assert_eq!(
        eval(r#"(string/substringAfter "key=value=x" "=")"#),
        Value::from("value=x")
    );
    assert_eq!(
        eval(r#"(string/substringAfter "plain" "=")"#),
        Value::from("plain")
    );
}

// Lists

#[test]
fn list_access() {
    assert_eq!(eval("(list/size [1 2 3])"), Value::Number(3.0));
    assert_eq!(eval("(list/get [1 2 3] 1)"), Value::Number(2.0));
    assert_eq!(eval("(list/get [1 2 3] 3)"), Value::Null);
    assert_eq!(eval("(list/get [1 2 3] 1.5)"), Value::Null);
}

#[test]
fn list_set_replaces_or_appends() {
    assert_eq!(render("(list/set [1 2] 0 9)"), "[9 2]");
    assert_eq!(render("(list/set [1 2] 2 9)"), "[1 2 9]");
    assert_eq!(
        error("(list/set [1 2] 5 9)"),
        "list/set index 5 is out of range for a list of size 2"
    );
}

#[test]
fn list_set_leaves_the_original_untouched() {
    let h = Harness::new();
    h.eval("(def $xs [1 2])").unwrap();
    h.eval("(list/set $xs 0 9)").unwrap();
    assert_eq!(h.eval("$xs").unwrap().to_string(), "[1 2]");
}

#[test]
fn list_higher_order_functions() {
    assert_eq!(render(r"(list/map [1 2 3] (\ * $1 2))"), "[2 4 6]");
    assert_eq!(render(r"(list/filter [1 2 3 4] (\ > $1 2))"), "[3 4]");
    assert_eq!(render(r"(list/flatMap [1 2] (\ list/range 0 $1))"), "[0 0 1]");
    assert_eq!(eval(r"(list/fold [1 2 3] 10 (\ + $1 $2))"), Value::Number(16.0));
    assert_eq!(
        error(r"(list/flatMap [1] (\ + $1 1))"),
        "list/flatMap expected function to return a list or a seq but found number"
    );
}

#[test]
fn list_ranges_and_slices() {
    assert_eq!(render("(list/range 2 5)"), "[2 3 4]");
    assert_eq!(render("(list/range 5 2)"), "[]");
    assert_eq!(render("(list/take [1 2 3] 2)"), "[1 2]");
    assert_eq!(render("(list/take [1 2 3] 10)"), "[1 2 3]");
    assert_eq!(render("(list/drop [1 2 3] 1)"), "[2 3]");
    assert_eq!(render("(list/drop [1 2 3] 10)"), "[]");
}

// Maps

#[test]
fn map_functions() {
    assert_eq!(eval("(map/get {a 1} a)"), Value::Number(1.0));
    assert_eq!(eval("(map/get {a 1} b)"), Value::Null);
    assert_eq!(render("(map/set {a 1} b 2)"), r#"{"a" 1 "b" 2}"#);
    assert_eq!(render("(map/set {a 1 b 2} a 3)"), r#"{"a" 3 "b" 2}"#);
    assert_eq!(eval("(map/has {a null} a)"), Value::Bool(true));
    assert_eq!(render("(map/remove {a 1 b 2} a)"), r#"{"b" 2}"#);
}

#[test]
fn map_keys_can_be_any_value() {
    assert_eq!(eval("(map/get (map/set {} [1 2] x) [1 2])"), Value::from("x"));
}

// Sequences

#[test]
fn infinite_ranges_can_be_taken() {
    assert_eq!(
        render("(seq/toList (seq/take (seq/range) 3))"),
        "[0 1 2]"
    );
    assert_eq!(
        render("(seq/toList (seq/take (seq/range 5 null) 2))"),
        "[5 6]"
    );
    assert_eq!(render("(seq/toList (seq/range 1 4))"), "[1 2 3]");
}

#[test]
fn sequences_are_lazy() {
    let h = Harness::new();
    h.eval(r#"(def $s (seq/map (seq/range) (\ do (echo "saw" $1) $1)))"#)
        .unwrap();
    assert_eq!(h.print.get_output(), "");
    assert_eq!(
        h.eval("(seq/toList (seq/take $s 2))").unwrap().to_string(),
        "[0 1]"
    );
    assert_eq!(h.print.get_output(), "saw 0\nsaw 1\n");
}

#[test]
fn sequence_stages_compose() {
    let source = r"(seq/toList
        (seq/take
            (seq/filter
                (seq/flatMap (seq/range 1) (\ list/range 0 $1))
                (\ > $1 0))
            4))";
    assert_eq!(render(source), "[1 1 2 1]");
}

#[test]
fn sequence_functions_accept_lists() {
    assert_eq!(render(r"(seq/toList (seq/map [1 2] (\ + $1 1)))"), "[2 3]");
    assert_eq!(eval("(seq/map [1] (\\ do $1))").type_name(), "sequence");
}

// Parsing

#[test]
fn parse_json() {
    assert_eq!(
        render(r#"(parse/json "{\"a\": [1, true, null, \"s\"]}")"#),
        r#"{"a" [1 true null "s"]}"#
    );
    assert!(error(r#"(parse/json "{")"#).starts_with("parse/json could not parse input"));
}

#[test]
fn parse_lines_trims_the_input() {
    assert_eq!(render(r#"(parse/lines "a\nb\n")"#), r#"["a" "b"]"#);
}

// Shell builtins

#[test]
fn definitions_can_be_listed_and_deleted() {
    let h = Harness::new();
    h.eval("(def $b 1) (def $a 2)").unwrap();
    assert_eq!(h.eval("(listDefs)").unwrap().to_string(), r#"["a" "b"]"#);
    assert_eq!(h.eval("(delete $a)").unwrap(), Value::Bool(true));
    assert_eq!(h.eval("(delete $a)").unwrap(), Value::Bool(false));
    h.eval("(clearDefs)").unwrap();
    assert_eq!(h.eval("(listDefs)").unwrap().to_string(), "[]");
}

#[test]
fn delete_needs_a_variable() {
    assert_eq!(error("(delete 1)"), "Expected first argument to delete to be a variable");
    assert_eq!(error("(delete)"), "Expected exactly one argument to delete");
}

#[test]
fn exit_sets_the_shell_flag() {
    let h = Harness::new();
    assert!(!h.shell.exit_requested());
    h.eval("(exit)").unwrap();
    assert!(h.shell.exit_requested());
    assert_eq!(error("(exit 1)"), "exit expected exactly no arguments");
}

#[test]
fn path_executables_are_listed() {
    assert_eq!(render("(listPath)"), r#"["fail" "greet"]"#);
}

#[test]
fn clear_results_resets_numbering() {
    let h = Harness::new();
    h.top.record_result(Value::Number(1.0));
    assert_eq!(h.eval("$result0").unwrap(), Value::Number(1.0));
    h.eval("(clearResults)").unwrap();
    assert!(h.eval("$result0").is_err());
}
