#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use shroud_ir::{PatternKind, StmtKind};

use crate::{obfuscate, ObfuscateConfig, ObfuscateError};

fn run(source: &str, config: &ObfuscateConfig) -> String {
    obfuscate(source, config).unwrap()
}

fn only() -> ObfuscateConfig {
    ObfuscateConfig::disabled()
}

#[test]
fn direct_string_escaped_in_place() {
    let config = only().with_encode_strings(true);
    assert_eq!(run("print('hi')\n", &config), "print(\"\\x68\\x69\")\n");
}

#[test]
fn module_docstring_kept() {
    let config = only().with_encode_strings(true);
    assert_eq!(
        run("\"\"\"doc\"\"\"\nx = 'a'\n", &config),
        "'doc'\nx = \"\\x61\"\n"
    );
}

#[test]
fn fstring_segments_become_header_slots() {
    let config = only().with_encode_strings(true);
    assert_eq!(
        run("x = f'a{b}'\n", &config),
        "_0x4 = \"\\x61\"\nx = f'{_0x4}{b}'\n"
    );
}

#[test]
fn fstring_slots_take_aliases_only() {
    let config = only()
        .with_encode_strings(true)
        .with_rename_variables(true)
        .with_rename_functions(true);
    let output = run("name = 'z'\nmsg = f'{name!r}{len(name)}{d[\"k\"]}'\n", &config);
    let last = output.lines().last().unwrap();
    assert!(last.contains("!r}"), "{output}");
    assert!(last.contains("{len("), "{output}");
    assert!(!last.contains("__import__"), "{output}");
    assert!(!last.contains('\\'), "{output}");
    assert!(!last.contains("name"), "{output}");
}

#[test]
fn reduced_strings_go_through_codepoints() {
    let config = only()
        .with_encode_strings(true)
        .with_reduce_string_length(true);
    let output = run("x = 'ab'\n", &config);
    let targets: Vec<&str> = output
        .lines()
        .map(|line| line.split(" = ").next().unwrap())
        .collect();
    assert_eq!(targets, ["_0x2", "_0x3", "_0x5", "_0x6", "_0x4", "x"]);
    assert!(output.contains("_0x4 = str().join(map(chr,[_0x5,_0x6]))\n"));
    assert!(output.ends_with("x = _0x4\n"));
}

#[test]
fn numbers_use_base_aliases() {
    let config = only().with_encode_numbers(true);
    assert_eq!(
        run("x = 5\n", &config),
        "_0x2 = ((not[()])+(not[()]))\n\
         _0x3 = ((not())+(not[()]))\n\
         _0x4 = (_0x3+((_0x3<<_0x3)<<_0x3))\n\
         x = _0x4\n"
    );
}

#[test]
fn booleans_use_idioms() {
    let config = only().with_encode_numbers(true);
    assert_eq!(
        run("flag = True\n", &config),
        "_0x1 = (not())\nflag = _0x1\n"
    );
}

#[test]
fn floats_read_back_from_text() {
    let config = only().with_encode_numbers(true);
    assert_eq!(
        run("r = 0.5\n", &config),
        "_0x4 = float(\"\\x30\\x2e\\x35\")\nr = _0x4\n"
    );
}

#[test]
fn module_attributes_become_reflective() {
    let config = only().with_encode_modules(true);
    assert_eq!(
        run("import os\nprint(os.getcwd())\n", &config),
        "print(getattr(__import__(\"\\x6f\\x73\"),\"\\x67\\x65\\x74\\x63\\x77\\x64\")())\n"
    );
}

#[test]
fn emptied_block_gets_pass() {
    let config = only().with_encode_modules(true);
    let output = run("if x:\n    import os\nos.sep\n", &config);
    assert!(output.starts_with("if x:\n    pass\n"), "{output}");
}

#[test]
fn side_effect_imports_stay() {
    let config = only().with_encode_modules(true);
    assert_eq!(run("import readline\n", &config), "import readline\n");
}

#[test]
fn builtin_calls_become_reflective() {
    let config = only().with_rename_functions(true);
    assert_eq!(
        run("print(1)\n", &config),
        "getattr(__import__(\"\\x62\\x75\\x69\\x6c\\x74\\x69\\x6e\\x73\"),\"\\x70\\x72\\x69\\x6e\\x74\")(1)\n"
    );
}

#[test]
fn shadowed_builtins_stay() {
    let config = only().with_rename_functions(true);
    let output = run("def print(x):\n    pass\nprint(1)\n", &config);
    assert!(output.ends_with("\nprint(1)\n"), "{output}");
}

#[test]
fn keywords_follow_user_parameters_only() {
    let config = only().with_rename_variables(true);
    let output = run(
        "def area(width, height=1):\n    return width * height\narea(width=2, height=3)\nsorted([], key=len)\n",
        &config,
    );
    assert_eq!(
        output,
        "def area(_0x5, _0x4=1):\n    return _0x5 * _0x4\narea(_0x5=2, _0x4=3)\nsorted([], key=len)\n"
    );
}

#[test]
fn kwargs_keywords_follow_same_named_bindings() {
    let config = only().with_rename_variables(true);
    let output = run(
        "level = 3\ndef log(**fields):\n    return fields\nlog(level=level)\nlog(other=1)\n",
        &config,
    );
    assert!(!output.contains("level"), "{output}");
    assert!(output.contains("log(other=1)"), "{output}");
}

#[test]
fn from_imports_bind_aliases() {
    let config = only().with_rename_functions(true);
    assert_eq!(
        run("from math import floor\nfloor(2.5)\n", &config),
        "from math import floor as _0x4\n_0x4(2.5)\n"
    );
}

#[test]
fn future_imports_untouched() {
    let config = ObfuscateConfig::default();
    let output = run("from __future__ import annotations\nx = 1\n", &config);
    assert!(output.starts_with("from __future__ import annotations\n"), "{output}");
}

#[test]
fn declarations_and_handlers_follow_bindings() {
    let config = only().with_rename_variables(true);
    let output = run(
        "count = 0\ndef bump():\n    global count\n    count += 1\ntry:\n    bump()\nexcept ValueError as err:\n    print(err)\n",
        &config,
    );
    assert!(output.contains("global _0x4\n"), "{output}");
    assert!(output.contains("_0x4 += 1\n"), "{output}");
    assert!(output.contains("except ValueError as _0x5:\n    print(_0x5)\n"), "{output}");
    assert!(!output.contains("count"), "{output}");
}

#[test]
fn bare_names_leave_unrelated_attributes() {
    let config = only().with_rename_variables(true);
    assert_eq!(
        run("data = load()\nprint(resp.data)\n", &config),
        "_0x4 = load()\nprint(resp.data)\n"
    );
}

#[test]
fn self_attributes_renamed_with_owner_kept() {
    let config = only().with_rename_variables(true);
    let output = run(
        "class A:\n    def __init__(self, size):\n        self.size = size\n",
        &config,
    );
    assert!(output.contains("def __init__(self, _0x4):"), "{output}");
    assert!(output.contains("self._0x4 = _0x4"), "{output}");
}

#[test]
fn disabled_config_reprints() {
    let source = "import os\nx = [1, 'a', f'{y}']\nprint(os.sep, x)\n";
    let expected = shroud_fmt::print_module(&shroud_parse::parse(source).unwrap());
    assert_eq!(run(source, &only()), expected);
}

#[test]
fn match_statement_reprints_when_disabled() {
    let source = "match 1:\n    case 1:\n        print('one')\n";
    assert_eq!(run(source, &only()), "match 1:\n    case 1:\n        print('one')\n");
}

#[test]
fn match_captures_follow_their_uses() {
    let config = only().with_rename_variables(true);
    let output = run(
        "match event:\n    case [first, *rest] if first:\n        print(first, rest)\n    case {'type': label, **extra}:\n        print(label, extra)\n",
        &config,
    );
    for original in ["first", "rest", "label", "extra"] {
        assert!(!output.contains(original), "{original} kept in {output}");
    }

    let module = shroud_parse::parse(&output).unwrap();
    let StmtKind::Match { cases, .. } = &module.body[0].kind else {
        panic!("expected match in {output}");
    };
    let PatternKind::Sequence(items) = &cases[0].pattern.kind else {
        panic!("expected sequence in {output}");
    };
    let (PatternKind::As { name: Some(first), .. }, PatternKind::Star(Some(rest))) =
        (&items[0].kind, &items[1].kind)
    else {
        panic!("expected captures in {output}");
    };
    assert!(output.contains(&format!("if {first}:")), "{output}");
    assert!(output.contains(&format!("print({first}, {rest})")), "{output}");
    let PatternKind::Mapping { rest: Some(extra), patterns, .. } = &cases[1].pattern.kind else {
        panic!("expected mapping in {output}");
    };
    let PatternKind::As { name: Some(label), .. } = &patterns[0].kind else {
        panic!("expected capture in {output}");
    };
    assert!(output.contains(&format!("print({label}, {extra})")), "{output}");
}

#[test]
fn pattern_literals_stay_literals() {
    let config = only().with_encode_numbers(true).with_encode_strings(true);
    let output = run(
        "code = 404\nmatch code:\n    case 404 | -1:\n        pass\n    case 'ok':\n        pass\n    case True:\n        pass\n",
        &config,
    );
    assert!(!output.contains("code = 404"), "{output}");
    assert!(output.contains("    case 404 | -1:\n"), "{output}");
    assert!(output.contains("    case \"\\x6f\\x6b\":\n"), "{output}");
    assert!(output.contains("    case True:\n"), "{output}");
}

#[test]
fn pattern_module_references_keep_import() {
    let config = only().with_encode_modules(true);
    let output = run(
        "import os\nmatch whence:\n    case os.SEEK_SET:\n        print(os.sep)\n",
        &config,
    );
    assert!(output.starts_with("import os\n"), "{output}");
    assert!(output.contains("case os.SEEK_SET:"), "{output}");
}

#[test]
fn class_patterns_follow_renamed_members() {
    let config = only().with_rename_variables(true).with_rename_classes(true);
    let output = run(
        "class Point:\n    def __init__(self, x, y):\n        self.x = x\n        self.y = y\nmatch p:\n    case Point(x=0, y=found):\n        print(found)\n",
        &config,
    );
    assert!(!output.contains("Point"), "{output}");
    assert!(!output.contains("x=0"), "{output}");
    assert!(!output.contains("found"), "{output}");
    assert!(!output.contains("self.x"), "{output}");
}

#[test]
fn type_alias_and_except_star_rename() {
    let config = only().with_rename_variables(true);
    let output = run(
        "type Pair = tuple[int, int]\ntry:\n    pass\nexcept* ValueError as group:\n    print(group, Pair)\n",
        &config,
    );
    assert!(output.starts_with("type _0x"), "{output}");
    assert!(output.contains("except* ValueError as _0x"), "{output}");
    assert!(!output.contains("Pair"), "{output}");
    assert!(!output.contains("group"), "{output}");
}

#[test]
fn syntax_errors_propagate() {
    let err = obfuscate("x = (\n", &ObfuscateConfig::default()).unwrap_err();
    assert!(matches!(err, ObfuscateError::Parse(_)));
    assert!(err.as_parse().is_some());
}
