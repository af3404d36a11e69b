//! Behavioral equivalence under a real interpreter.
//!
//! Skipped silently when `python3` is not on the path.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::assert_same_output;
use pretty_assertions::assert_eq;
use shroud_obf::{obfuscate, ObfuscateConfig};

const PROGRAMS: &[&str] = &[
    "\
def fib(n):
    a, b = 0, 1
    for _ in range(n):
        a, b = b, a + b
    return a

print([fib(i) for i in range(15)])
",
    "\
import string
words = ['alpha', 'Beta', 'gamma']
caps = [w.upper() for w in words if w[0] in string.ascii_lowercase]
print(', '.join(caps), len(caps), sep=' | ')
",
    "\
class Stack:
    def __init__(self):
        self.items = []

    def push(self, item):
        self.items.append(item)
        return self

    def take(self):
        return self.items.pop()

s = Stack().push(1).push(-7).push(2 ** 70)
print(s.take(), s.take(), s.take(), s.items)
",
    "\
total = 0
def add(amount=1):
    global total
    total += amount
try:
    add(amount=41)
    add()
    raise ValueError(f'reached {total!r} at {0.5:>6}')
except ValueError as err:
    print(err)
",
    "\
import os.path as osp
from math import floor as fl, pi
print(osp.join('a', 'b'), fl(pi * 100), {'k': 3.5e-3, 'z': True, 'n': None})
",
    "\
text = 'naïve café ☕'
print(text, len(text), text[::-1], '' == str())
",
    "\
big = 2037035976334486086268445688409378161051468393665936250636140449354381299763336706183397376
print(big, -big + 1, big >> 290, 1 << 1000 == big ** 3 * (1 << 100))
",
    "\
def describe(command):
    match command:
        case ['go', direction]:
            return f'going {direction}'
        case {'x': x, 'y': y, **rest}:
            return x + y + len(rest)
        case Point(x=0, y=py) | Point(x=py, y=0):
            return py
        case int(n) if n > 10:
            return -n
        case str() as word:
            return word.upper()
        case (1 | 2 | 3) as small:
            return small * 100
        case [first, *others]:
            return first, others
        case None:
            return 'nothing'
        case _:
            return 'unknown'

class Point:
    def __init__(self, x, y):
        self.x = x
        self.y = y

for value in [['go', 'north'], {'x': 1, 'y': 2, 'z': 3}, Point(0, 7), 42, 'hey', 2, [9, 8, 7], None, 5.5]:
    print(describe(value))
",
];

fn configs() -> Vec<ObfuscateConfig> {
    let only = ObfuscateConfig::disabled;
    vec![
        only(),
        only().with_rename_variables(true),
        only().with_rename_functions(true),
        only().with_rename_classes(true),
        only().with_encode_modules(true),
        only().with_encode_numbers(true),
        only().with_encode_strings(true),
        only()
            .with_encode_strings(true)
            .with_reduce_string_length(true),
        ObfuscateConfig::default(),
        ObfuscateConfig::default().with_reduce_string_length(true),
    ]
}

#[test]
fn every_category_preserves_behavior() {
    for source in PROGRAMS {
        for config in configs() {
            let output = obfuscate(source, &config)
                .unwrap_or_else(|err| panic!("{config:?} failed: {err}\n{source}"));
            assert_same_output(source, &output);
        }
    }
}

#[test]
fn disabled_output_reprints_the_same_tree() {
    for source in PROGRAMS {
        let output = obfuscate(source, &ObfuscateConfig::disabled()).unwrap();
        let expected = shroud_fmt::print_module(&shroud_parse::parse(source).unwrap());
        let reprinted = shroud_fmt::print_module(&shroud_parse::parse(&output).unwrap());
        assert_eq!(reprinted, expected);
        assert_eq!(output, expected);
    }
}
