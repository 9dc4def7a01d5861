//! End-to-end tests for the type-check walk: operator typing, call
//! checking, statement rules, and the absorbing error type.

mod common;

use common::analyze;

// === operators ===

#[test]
fn arithmetic_requires_int_operands() {
    let a = analyze("void main() {\n    int x;\n    bool b;\n    x = b + 1;\n}\n");
    assert_eq!(
        a.located(),
        vec![(4, 9, "Arithmetic operator applied to non-numeric operand")]
    );
    assert!(!a.type_check_ok);
}

#[test]
fn arithmetic_reports_both_operands() {
    let a = analyze("void main() {\n    bool b;\n    b = true + false;\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (3, 9, "Arithmetic operator applied to non-numeric operand"),
            (3, 16, "Arithmetic operator applied to non-numeric operand"),
        ]
    );
}

#[test]
fn relational_requires_int_operands() {
    let a = analyze("void main() {\n    bool b;\n    b = b < true;\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (3, 9, "Relational operator applied to non-numeric operand"),
            (3, 13, "Relational operator applied to non-numeric operand"),
        ]
    );
}

#[test]
fn logical_requires_bool_operands() {
    let a = analyze("void main() {\n    bool b;\n    b = 1 && b;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 9, "Logical operator applied to non-bool operand")]
    );
}

#[test]
fn unary_minus_requires_int() {
    let a = analyze("void main() {\n    int x;\n    x = -true;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 10, "Arithmetic operator applied to non-numeric operand")]
    );
}

#[test]
fn unary_not_requires_bool() {
    let a = analyze("void main() {\n    bool b;\n    b = !3;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 10, "Logical operator applied to non-bool operand")]
    );
}

// === equality ===

#[test]
fn equality_on_void_calls() {
    let a = analyze("void f() {\n}\nvoid main() {\n    if (f() == f()) {\n    }\n}\n");
    // the condition's error type is absorbed: no if-condition diagnostic
    assert_eq!(
        a.located(),
        vec![(4, 9, "Equality operator applied to void functions")]
    );
}

#[test]
fn equality_on_functions() {
    let a = analyze("void f() {\n}\nvoid g() {\n}\nvoid main() {\n    if (f == g) {\n    }\n}\n");
    assert_eq!(
        a.located(),
        vec![(6, 9, "Equality operator applied to functions")]
    );
}

#[test]
fn equality_on_struct_names() {
    let a = analyze("struct S {\n    int a;\n};\nvoid main() {\n    if (S == S) {\n    }\n}\n");
    assert_eq!(
        a.located(),
        vec![(5, 9, "Equality operator applied to struct names")]
    );
}

#[test]
fn equality_on_struct_variables() {
    let a = analyze(
        "struct S {\n    int a;\n};\nstruct S s;\nstruct S t;\nvoid main() {\n    if (s == t) {\n    }\n}\n",
    );
    assert_eq!(
        a.located(),
        vec![(7, 9, "Equality operator applied to struct variables")]
    );
}

#[test]
fn equality_type_mismatch() {
    let a = analyze("void main() {\n    if (3 == true) {\n    }\n}\n");
    assert_eq!(a.located(), vec![(2, 9, "Type mismatch")]);
}

#[test]
fn equality_of_ints_is_bool() {
    let a = analyze("void main() {\n    if (3 == 4) {\n    }\n}\n");
    assert!(a.is_clean());
}

// === assignment ===

#[test]
fn assignment_type_mismatch() {
    let a = analyze("int x;\nvoid main() {\n    x = true;\n}\n");
    assert_eq!(a.located(), vec![(3, 5, "Type mismatch")]);
    assert!(!a.type_check_ok);
}

#[test]
fn function_assignment() {
    let a = analyze("void f() {\n}\nvoid g() {\n}\nvoid main() {\n    f = g;\n}\n");
    assert_eq!(a.located(), vec![(6, 5, "Function assignment")]);
}

#[test]
fn struct_name_assignment() {
    let a = analyze("struct S {\n    int a;\n};\nvoid main() {\n    S = S;\n}\n");
    assert_eq!(a.located(), vec![(5, 5, "Struct name assignment")]);
}

#[test]
fn struct_variable_assignment() {
    let a = analyze(
        "struct S {\n    int a;\n};\nstruct S s;\nstruct S t;\nvoid main() {\n    s = t;\n}\n",
    );
    assert_eq!(a.located(), vec![(7, 5, "Struct variable assignment")]);
}

#[test]
fn nested_assignment_types_flow() {
    let a = analyze("void main() {\n    int x;\n    int y;\n    x = y = 3;\n}\n");
    assert!(a.is_clean());
}

#[test]
fn nested_assignment_mismatch_is_absorbed() {
    let a = analyze("void main() {\n    int x;\n    int y;\n    x = y = true;\n}\n");
    // only the inner assignment reports; the outer consumes its error
    assert_eq!(a.located(), vec![(4, 9, "Type mismatch")]);
}

// === calls ===

#[test]
fn call_of_non_function() {
    let a = analyze("int x;\nvoid main() {\n    x(3);\n}\n");
    assert_eq!(a.located(), vec![(3, 5, "Attempt to call a non-function")]);
}

#[test]
fn call_with_wrong_arg_count() {
    let a = analyze("int h(int a, bool b) {\n    return 0;\n}\nvoid main() {\n    h(1);\n}\n");
    assert_eq!(
        a.located(),
        vec![(5, 5, "Function call with wrong number of args")]
    );
}

#[test]
fn call_reports_each_bad_actual() {
    let a = analyze("int h(int a, bool b) {\n    return 0;\n}\nvoid main() {\n    h(true, 3);\n}\n");
    assert_eq!(
        a.located(),
        vec![
            (5, 7, "Type of actual does not match type of formal"),
            (5, 13, "Type of actual does not match type of formal"),
        ]
    );
}

#[test]
fn error_typed_actual_stays_silent() {
    let a = analyze(
        "int h(int a) {\n    return a;\n}\nvoid main() {\n    int x;\n    bool b;\n    x = h(b + 1);\n}\n",
    );
    // the argument's own failure is the only diagnostic
    assert_eq!(
        a.located(),
        vec![(7, 11, "Arithmetic operator applied to non-numeric operand")]
    );
}

#[test]
fn call_result_type_is_used() {
    let a = analyze("bool p() {\n    return true;\n}\nvoid main() {\n    if (p()) {\n    }\n}\n");
    assert!(a.is_clean());
}

// === statements ===

#[test]
fn post_increment_requires_int() {
    let a = analyze("void main() {\n    bool b;\n    b++;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 5, "Arithmetic operator applied to non-numeric operand")]
    );
}

#[test]
fn read_and_write_reject_non_values() {
    let a = analyze(
        "void f() {\n}\nstruct S {\n    int a;\n};\nstruct S s;\nvoid main() {\n    cin >> f;\n    cin >> S;\n    cin >> s;\n    cout << f;\n    cout << S;\n    cout << s;\n    cout << f();\n}\n",
    );
    assert_eq!(
        a.located(),
        vec![
            (8, 12, "Attempt to read a function"),
            (9, 12, "Attempt to read a struct name"),
            (10, 12, "Attempt to read a struct variable"),
            (11, 13, "Attempt to write a function"),
            (12, 13, "Attempt to write a struct name"),
            (13, 13, "Attempt to write a struct variable"),
            (14, 13, "Attempt to write void"),
        ]
    );
}

#[test]
fn write_accepts_values_and_strings() {
    let a = analyze("void main() {\n    cout << \"hello\\n\";\n    cout << 3;\n    cout << true;\n}\n");
    assert!(a.is_clean());
}

#[test]
fn if_condition_must_be_bool() {
    let a = analyze("void main() {\n    if (3) {\n    }\n}\n");
    assert_eq!(
        a.located(),
        vec![(2, 9, "Non-bool expression used as an if condition")]
    );
}

#[test]
fn if_else_checks_both_arms() {
    let a = analyze(
        "void main() {\n    int x;\n    if (true) {\n        x = true;\n    }\n    else {\n        x = false;\n    }\n}\n",
    );
    assert_eq!(
        a.located(),
        vec![(4, 9, "Type mismatch"), (7, 9, "Type mismatch")]
    );
}

#[test]
fn while_condition_must_be_bool() {
    let a = analyze("void main() {\n    int x;\n    x++;\n    while (x) {\n        x = x + 1;\n    }\n}\n");
    assert_eq!(
        a.located(),
        vec![(4, 12, "Non-bool expression used as a while condition")]
    );
}

#[test]
fn repeat_clause_must_be_int() {
    let a = analyze("void main() {\n    repeat (true) {\n    }\n}\n");
    assert_eq!(
        a.located(),
        vec![(2, 13, "Non-integer expression used as a repeat clause")]
    );
}

// === returns ===

#[test]
fn return_value_in_void_function() {
    let a = analyze("void f() {\n    return 5;\n}\n");
    assert_eq!(
        a.located(),
        vec![(2, 12, "Return with a value in a void function")]
    );
}

#[test]
fn missing_return_value_is_at_origin() {
    let a = analyze("int g() {\n    return;\n}\n");
    assert_eq!(a.located(), vec![(0, 0, "Missing return value")]);
}

#[test]
fn bad_return_value() {
    let a = analyze("int g() {\n    return true;\n}\n");
    assert_eq!(a.located(), vec![(2, 12, "Bad return value")]);
}

#[test]
fn error_typed_return_stays_silent() {
    let a = analyze("int g() {\n    bool b;\n    return b + 1;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 12, "Arithmetic operator applied to non-numeric operand")]
    );
}

#[test]
fn plain_return_in_void_function() {
    let a = analyze("void f() {\n    return;\n}\n");
    assert!(a.is_clean());
}

// === propagation and list checking ===

#[test]
fn error_operands_do_not_cascade() {
    let a = analyze("void main() {\n    int x;\n    bool b;\n    x = (b + 1) * 2;\n}\n");
    assert_eq!(
        a.located(),
        vec![(4, 10, "Arithmetic operator applied to non-numeric operand")]
    );
}

#[test]
fn later_statements_are_still_checked() {
    let a = analyze("void main() {\n    int x;\n    x = true;\n    x = false;\n    x = 3;\n}\n");
    assert_eq!(
        a.located(),
        vec![(3, 5, "Type mismatch"), (4, 5, "Type mismatch")]
    );
    assert!(!a.type_check_ok);
}

#[test]
fn clean_program_type_checks() {
    let a = analyze(
        "struct Point {\n    int x;\n    int y;\n};\nstruct Point p;\nint scale;\nint twice(int n) {\n    return n + n;\n}\nvoid main() {\n    cin >> scale;\n    p.x = twice(scale);\n    p.y = 0;\n    while (p.y < p.x) {\n        p.y++;\n    }\n    repeat (twice(2)) {\n        cout << \"tick\";\n    }\n    if (p.y == p.x && !(scale < 0)) {\n        cout << p.y;\n    }\n    else {\n        cout << \"mismatch\";\n    }\n}\n",
    );
    assert!(a.is_clean(), "diagnostics: {:?}", a.messages());
}
