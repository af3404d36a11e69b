#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Idempotence of the printer over realistic programs.
//!
//! For every sample, `print(parse(print(parse(src))))` must equal
//! `print(parse(src))`: the printed form is a fixed point.

use shroud_fmt::print_module;

const SAMPLES: &[(&str, &str)] = &[
    (
        "script",
        r#"#!/usr/bin/env python3
"""Count words in a file."""
from __future__ import annotations

import sys
from collections import Counter


def count(path: str, *, top: int = 10) -> list[tuple[str, int]]:
    with open(path, encoding="utf-8") as handle:
        words = handle.read().split()
    return Counter(w.lower() for w in words).most_common(top)


if __name__ == "__main__":
    for word, n in count(sys.argv[1]):
        print(f"{word:>20} {n:5d}")
"#,
    ),
    (
        "class",
        r#"
class Account(Base, metaclass=Meta):
    rate = 0.05

    def __init__(self, owner, balance=0):
        self.owner = owner
        self.balance = balance

    @property
    def interest(self):
        return self.balance * self.rate

    def withdraw(self, amount):
        if amount > self.balance:
            raise ValueError(f"insufficient funds: {self.balance!r}")
        elif amount < 0:
            raise ValueError("negative")
        else:
            self.balance -= amount
        return self.balance
"#,
    ),
    (
        "control",
        r#"
def search(items, key):
    lo, hi = 0, len(items) - 1
    while lo <= hi:
        mid = (lo + hi) // 2
        if items[mid] == key:
            return mid
        elif items[mid] < key:
            lo = mid + 1
        else:
            hi = mid - 1
    else:
        return -1

try:
    value = search([1, 2, 3], 2)
except (KeyError, IndexError) as err:
    value = None
finally:
    done = True
"#,
    ),
    (
        "expressions",
        r#"
x = [i ** 2 for i in range(10) if i % 2 == 0 and not i > 5]
y = {k: v for k, v in zip("abc", range(3))}
z = {*x, *y}
w = (lambda a, b=2, *c, d, **e: a + b)(1, d=4)
v = a if b else c if d else e
u = x[1:-1:2], x[::], x[...]
t = -(-1) + ~2 ** -3
s = b"\x00\xff" + bytes(3)
r = 1_000_000 + 0o17 + 0b101 + 1e-5 + 2.5j
q = not a in b and c is not d
"#,
    ),
    (
        "async",
        r#"
async def fetch(session, *urls):
    async with session.get(urls[0]) as resp:
        data = await resp.json()
    results = [await f(u) async for u in aiter(urls)]
    return data, results
"#,
    ),
    (
        "scoping",
        r#"
counter = 0

def bump():
    global counter
    counter += 1

    def inner():
        nonlocal_value = 1
        def deeper():
            nonlocal nonlocal_value
            nonlocal_value += 1
        return deeper
    return inner

del counter
assert bump() is None, "bump returns nothing"
"#,
    ),
    (
        "matching",
        r#"
type Command = tuple[str, int]

def run(command):
    match command:
        case ("move" | "go", steps) if steps > 0:
            return steps
        case {"name": name, **extra}:
            return name, extra
        case [*_, last]:
            return last
        case _:
            try:
                raise ValueError(command)
            except* ValueError as group:
                return group
"#,
    ),
];

fn reprint(source: &str) -> String {
    let module = shroud_parse::parse(source)
        .unwrap_or_else(|err| panic!("parse failed: {err} at {}", err.span));
    print_module(&module)
}

#[test]
fn printed_form_is_a_fixed_point() {
    for (name, source) in SAMPLES {
        let once = reprint(source);
        let twice = reprint(&once);
        assert_eq!(once, twice, "sample `{name}` is not idempotent");
    }
}

#[test]
fn printed_form_keeps_statement_count() {
    for (name, source) in SAMPLES {
        let before = shroud_parse::parse(source).unwrap().body.len();
        let after = shroud_parse::parse(&reprint(source)).unwrap().body.len();
        assert_eq!(before, after, "sample `{name}` changed shape");
    }
}
