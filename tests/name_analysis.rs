//! End-to-end tests for the name-analysis walk: scope rules, duplicate
//! and undeclared identifiers, and struct field resolution.

mod common;

use cmmc::semantic::Type;
use common::analyze;

#[test]
fn clean_program_binds_everything() {
    let a = analyze("int x;\nint h(int a, bool b) {\n    return a;\n}\nvoid main() {\n    x = h(3, true);\n}\n");
    assert!(a.is_clean(), "diagnostics: {:?}", a.messages());

    // the populated global table is reachable for later phases
    let x = a.globals.lookup_global("x").unwrap().unwrap();
    assert_eq!(a.syms.type_of(x), Type::Int);

    let h = a.globals.lookup_global("h").unwrap().unwrap();
    assert_eq!(
        a.syms.type_of(h),
        Type::Fn {
            formals: vec![Type::Int, Type::Bool],
            ret: Box::new(Type::Int),
        }
    );
}

#[test]
fn multiply_declared_global() {
    let a = analyze("int x;\nbool x;\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(2, 6, "Multiply declared identifier")]);

    // the first binding remains
    let x = a.globals.lookup_global("x").unwrap().unwrap();
    assert_eq!(a.syms.type_of(x), Type::Int);
}

#[test]
fn shadowing_across_scopes_is_silent() {
    let a = analyze(
        "int x;\nvoid main() {\n    int x;\n    x = 3;\n    if (true) {\n        bool x;\n        x = false;\n    }\n}\n",
    );
    assert!(a.is_clean());
}

#[test]
fn undeclared_identifier() {
    let a = analyze("void main() {\n    x = 3;\n}\n");
    assert_eq!(a.located(), vec![(2, 5, "Undeclared identifier")]);
}

#[test]
fn each_undeclared_use_reports_once() {
    let a = analyze("void main() {\n    x = x + 1;\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (2, 5, "Undeclared identifier"),
            (2, 9, "Undeclared identifier"),
        ]
    );
}

#[test]
fn variable_declared_void() {
    let a = analyze("void x;\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(1, 6, "Non-function declared void")]);
}

#[test]
fn formal_declared_void() {
    let a = analyze("void f(void a) {\n}\n");
    assert_eq!(a.located(), vec![(1, 13, "Non-function declared void")]);
}

#[test]
fn void_and_duplicate_both_reported() {
    let a = analyze("int x;\nvoid x;\nvoid main() {\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (2, 6, "Non-function declared void"),
            (2, 6, "Multiply declared identifier"),
        ]
    );
}

#[test]
fn unknown_struct_type_name() {
    let a = analyze("struct S s;\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(1, 8, "Invalid name of struct type")]);
}

#[test]
fn struct_type_name_must_be_a_struct() {
    // 'x' names an int variable, not a struct definition
    let a = analyze("int x;\nstruct x s;\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(2, 8, "Invalid name of struct type")]);
}

#[test]
fn struct_fields_resolve_through_the_instance() {
    let a = analyze(
        "struct Point {\n    int x;\n    int y;\n};\nstruct Point p;\nvoid main() {\n    p.x = 3;\n    p.y = p.x;\n}\n",
    );
    assert!(a.is_clean());
}

#[test]
fn struct_fields_are_not_in_scope_unqualified() {
    let a = analyze("struct Point {\n    int x;\n};\nvoid main() {\n    x = 3;\n}\n");
    assert_eq!(a.located(), vec![(5, 5, "Undeclared identifier")]);
}

#[test]
fn invalid_struct_field_name() {
    let a = analyze(
        "struct S {\n    int a;\n};\nstruct S s;\nvoid main() {\n    s.a = s.b;\n}\n",
    );
    // exactly one diagnostic: no type mismatch is piled on top
    assert_eq!(a.located(), vec![(6, 13, "Invalid struct field name")]);
}

#[test]
fn dot_access_of_non_struct() {
    let a = analyze("int x;\nvoid main() {\n    x.a = 3;\n}\n");
    assert_eq!(a.located(), vec![(3, 5, "Dot-access of non-struct type")]);
}

#[test]
fn dot_access_on_undeclared_lhs_is_silent() {
    let a = analyze("void main() {\n    q.a = 3;\n}\n");
    assert_eq!(a.located(), vec![(2, 5, "Undeclared identifier")]);
}

#[test]
fn chained_dot_access_resolves() {
    let a = analyze(
        "struct Inner {\n    int v;\n};\nstruct Outer {\n    struct Inner in;\n};\nstruct Outer o;\nvoid main() {\n    o.in.v = 3;\n}\n",
    );
    assert!(a.is_clean());
}

#[test]
fn bad_inner_access_suppresses_the_chain() {
    let a = analyze(
        "struct Inner {\n    int v;\n};\nstruct Outer {\n    struct Inner in;\n};\nstruct Outer o;\nvoid main() {\n    o.w.v = 3;\n}\n",
    );
    // only the root failure is reported
    assert_eq!(a.located(), vec![(9, 7, "Invalid struct field name")]);
}

#[test]
fn non_struct_field_cannot_continue_a_chain() {
    let a = analyze(
        "struct Inner {\n    int v;\n};\nstruct Outer {\n    struct Inner in;\n};\nstruct Outer o;\nvoid main() {\n    o.in.v.q = 3;\n}\n",
    );
    // 'v' is an int field, so the access o.in.v cannot be dotted again
    assert_eq!(a.located(), vec![(9, 10, "Dot-access of non-struct type")]);
}

#[test]
fn duplicate_formals() {
    let a = analyze("void f(int a, int a) {\n}\n");
    assert_eq!(a.located(), vec![(1, 19, "Multiply declared identifier")]);
}

#[test]
fn duplicate_function_still_analyzes_body() {
    let a = analyze("void f() {\n}\nint f() {\n    return undeclared;\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (3, 5, "Multiply declared identifier"),
            (4, 12, "Undeclared identifier"),
        ]
    );
}

#[test]
fn duplicate_struct_definition() {
    let a = analyze("int S;\nstruct S {\n    int a;\n};\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(2, 8, "Multiply declared identifier")]);
}

#[test]
fn duplicate_struct_field() {
    let a = analyze("struct S {\n    int a;\n    bool a;\n};\nvoid main() {\n}\n");
    assert_eq!(a.located(), vec![(3, 10, "Multiply declared identifier")]);
}
