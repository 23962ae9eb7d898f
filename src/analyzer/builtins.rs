use rustc_hash::FxHashSet;

#[rustfmt::skip]
pub const BUILTINS: &[&str] = &[
    // arithmetic and comparison
    "+", "-", "*", "/", "=", "<", ">", "<=", ">=",
    // logic
    "not", "and", "or",
    // construction
    "cons", "conj", "first", "rest", "list", "vector", "hash-map", "hash-set",
    // output
    "println", "print", "pr", "prn", "str",
    // sequences
    "map", "reduce", "filter", "remove", "take", "drop",
    "inc", "dec", "count", "empty?", "nil?", "some?",
    // associative
    "get", "assoc", "dissoc", "update", "keys", "vals",
    // state
    "atom", "swap!", "reset!", "deref",
    // exceptions
    "throw", "try", "catch", "finally",
    // namespaces
    "ns", "require", "import", "use",
];

lazy_static! {
    static ref BUILTIN_SET: FxHashSet<&'static str> = BUILTINS.iter().copied().collect();
}

/// Is `name` one of the fixed set of core functions every program can refer to?
#[inline]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SET.contains(name)
}
