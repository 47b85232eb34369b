//! Per-file change classification: status, test detection, and structural
//! symbols found in added or removed lines.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::commit::action::{Action, Category};
use crate::diff::{FileChangeRecord, FilteredLines, filter_lines};

/// Type-definition line; captures the type name. `\w` is Unicode-aware, so
/// identifiers like `Café` are captured whole.
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*class\s+(\w+)").expect("type pattern is valid"));

/// Function declaration; captures leading indentation and the name.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:async\s+)?def\s+(\w+)\(").expect("function pattern is valid")
});

/// Conventional name for test files and directories.
const TEST_PREFIX: &str = "test_";
const TEST_DIR: &str = "tests";

/// File-level status from the diff's mode headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
        }
    }
}

/// Detect new/deleted markers among a file's raw lines.
pub fn detect_status<S: AsRef<str>>(raw_lines: &[S]) -> FileStatus {
    let mut status = FileStatus::Modified;
    for line in raw_lines {
        let line = line.as_ref();
        if line.starts_with("new file mode") {
            return FileStatus::Added;
        }
        if line.starts_with("deleted file mode") {
            status = FileStatus::Deleted;
        }
    }
    status
}

/// Whether a path names a test file: `test_*` basename, or any directory
/// called `tests` or `test_*`.
pub fn is_test_file(path: &str) -> bool {
    let mut segments: Vec<&str> = path.split('/').collect();
    let basename = segments.pop().unwrap_or_default();

    basename.to_lowercase().starts_with(TEST_PREFIX)
        || segments
            .iter()
            .any(|dir| *dir == TEST_DIR || dir.starts_with(TEST_PREFIX))
}

/// A named declaration found in changed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Type(String),
    Function(String),
    Method { owner: String, name: String },
}

/// Symbols found in one direction (added or removed) of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symbols {
    pub types: Vec<String>,
    pub functions: Vec<String>,
    /// `(owner, method)` pairs.
    pub methods: Vec<(String, String)>,
}

impl Symbols {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty() && self.methods.is_empty()
    }

    fn push(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Type(name) => self.types.push(name),
            Symbol::Function(name) => self.functions.push(name),
            Symbol::Method { owner, name } => self.methods.push((owner, name)),
        }
    }
}

/// Line-at-a-time declaration recognizer tracking the enclosing type.
///
/// A type line opens a scope. An indented function inside an open scope is a
/// method of that type; any other function is free and closes the scope.
#[derive(Debug, Default)]
pub struct SymbolScanner {
    enclosing_type: Option<String>,
}

impl SymbolScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enclosing_type(&self) -> Option<&str> {
        self.enclosing_type.as_deref()
    }

    /// Advance over one content line, returning the symbol it declares.
    pub fn scan(&mut self, line: &str) -> Option<Symbol> {
        if let Some(caps) = TYPE_RE.captures(line) {
            let name = caps[1].to_string();
            self.enclosing_type = Some(name.clone());
            return Some(Symbol::Type(name));
        }

        let caps = FUNCTION_RE.captures(line)?;
        let indent = caps[1].len();
        let name = caps[2].to_string();

        if indent > 0 {
            if let Some(owner) = &self.enclosing_type {
                return Some(Symbol::Method {
                    owner: owner.clone(),
                    name,
                });
            }
        }

        self.enclosing_type = None;
        Some(Symbol::Function(name))
    }
}

/// Run a fresh scanner over a stream of content lines.
pub fn extract_symbols<S: AsRef<str>>(lines: &[S]) -> Symbols {
    let mut scanner = SymbolScanner::new();
    let mut symbols = Symbols::default();
    for line in lines {
        if let Some(symbol) = scanner.scan(line.as_ref()) {
            symbols.push(symbol);
        }
    }
    symbols
}

/// Produce the actions describing one file's change.
pub fn classify_file(record: &FileChangeRecord) -> Vec<Action> {
    let status = detect_status(&record.raw_lines);
    let basename = record.basename();
    let module = record.module_name();

    if is_test_file(&record.path) {
        debug!("{}: test file ({status})", record.path);
        if status == FileStatus::Added {
            return vec![Action::new(
                Category::AddTest,
                format!("Add new test file {basename}"),
            )];
        }
        let lines = filter_lines(&record.raw_lines);
        return classify_test_lines(&lines, basename).into_iter().collect();
    }

    match status {
        FileStatus::Added => {
            debug!("{}: new module", record.path);
            return vec![Action::new(
                Category::AddModule,
                format!("Add new module {module}"),
            )];
        }
        FileStatus::Deleted => {
            debug!("{}: deleted module", record.path);
            return vec![Action::new(
                Category::RemoveModule,
                format!("Remove module {module}"),
            )];
        }
        FileStatus::Modified => {}
    }

    let lines = filter_lines(&record.raw_lines);
    let added = extract_symbols(&lines.added);
    let removed = extract_symbols(&lines.removed);
    debug!(
        "{}: +{} -{} lines, +{:?} -{:?}",
        record.path,
        lines.added.len(),
        lines.removed.len(),
        added,
        removed
    );

    if added.is_empty() && removed.is_empty() {
        return classify_plain_lines(&lines, module).into_iter().collect();
    }

    symbol_actions(&added, &removed, module)
}

fn classify_test_lines(lines: &FilteredLines, basename: &str) -> Option<Action> {
    match (lines.added.is_empty(), lines.removed.is_empty()) {
        (false, false) => Some(Action::new(
            Category::UpdateTest,
            format!("Update tests in {basename}"),
        )),
        (false, true) => Some(Action::new(
            Category::AddTest,
            format!("Add tests in {basename}"),
        )),
        (true, false) => Some(Action::new(
            Category::RemoveTest,
            format!("Remove tests in {basename}"),
        )),
        (true, true) => None,
    }
}

fn classify_plain_lines(lines: &FilteredLines, module: &str) -> Option<Action> {
    match (lines.added.is_empty(), lines.removed.is_empty()) {
        (false, false) => Some(Action::new(
            Category::ModifyCode,
            format!("Modify code in {module}"),
        )),
        (false, true) => Some(Action::new(
            Category::AddCode,
            format!("Add code in {module}"),
        )),
        (true, false) => Some(Action::new(
            Category::RemoveCode,
            format!("Remove code in {module}"),
        )),
        (true, true) => None,
    }
}

/// Emit symbol actions in fixed order: types, functions, then methods, each
/// added before removed.
fn symbol_actions(added: &Symbols, removed: &Symbols, module: &str) -> Vec<Action> {
    let mut actions = Vec::new();

    for name in &added.types {
        actions.push(Action::new(
            Category::AddType,
            format!("Add class {name} in {module}"),
        ));
    }
    for name in &removed.types {
        actions.push(Action::new(
            Category::RemoveType,
            format!("Remove class {name} from {module}"),
        ));
    }
    for name in &added.functions {
        actions.push(Action::new(
            Category::AddFunction,
            format!("Add function {name} in {module}"),
        ));
    }
    for name in &removed.functions {
        actions.push(Action::new(
            Category::RemoveFunction,
            format!("Remove function {name} from {module}"),
        ));
    }
    for (owner, name) in &added.methods {
        actions.push(Action::new(
            Category::AddMethod,
            format!("Add method {name} to class {owner} in {module}"),
        ));
    }
    for (owner, name) in &removed.methods {
        actions.push(Action::new(
            Category::RemoveMethod,
            format!("Remove method {name} from class {owner} in {module}"),
        ));
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, lines: &[&str]) -> FileChangeRecord {
        FileChangeRecord {
            path: path.to_string(),
            raw_lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn texts(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(|a| a.text.as_str()).collect()
    }

    #[test]
    fn test_file_status_display() {
        assert_eq!(FileStatus::Added.to_string(), "Added");
        assert_eq!(FileStatus::Modified.to_string(), "Modified");
        assert_eq!(FileStatus::Deleted.to_string(), "Deleted");
    }

    #[test]
    fn test_detect_status() {
        assert_eq!(detect_status(&["new file mode 100644", "+x"]), FileStatus::Added);
        assert_eq!(detect_status(&["deleted file mode 100644", "-x"]), FileStatus::Deleted);
        assert_eq!(detect_status(&["index 1..2", "+x", "-y"]), FileStatus::Modified);
        assert_eq!(detect_status::<&str>(&[]), FileStatus::Modified);
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file("test_parser.py"));
        assert!(is_test_file("Test_Parser.py"));
        assert!(is_test_file("tests/helpers.py"));
        assert!(is_test_file("pkg/tests/conftest.py"));
        assert!(is_test_file("pkg/test_data/fixture.py"));
        assert!(!is_test_file("src/parser.py"));
        assert!(!is_test_file("src/contest.py"));
        assert!(!is_test_file("testing/runner.py"));
    }

    #[test]
    fn test_scanner_methods_bind_to_enclosing_type() {
        let mut scanner = SymbolScanner::new();
        assert_eq!(scanner.scan("class Parser:"), Some(Symbol::Type("Parser".into())));
        assert_eq!(scanner.enclosing_type(), Some("Parser"));
        assert_eq!(
            scanner.scan("    def parse(self):"),
            Some(Symbol::Method {
                owner: "Parser".into(),
                name: "parse".into()
            })
        );
        assert_eq!(scanner.scan("        return 1"), None);
        assert_eq!(scanner.scan("def helper():"), Some(Symbol::Function("helper".into())));
        assert_eq!(scanner.enclosing_type(), None);
    }

    #[test]
    fn test_scanner_indented_function_without_type_is_free() {
        let mut scanner = SymbolScanner::new();
        assert_eq!(scanner.scan("    def inner():"), Some(Symbol::Function("inner".into())));
    }

    #[test]
    fn test_scanner_non_ascii_identifiers() {
        let mut scanner = SymbolScanner::new();
        assert_eq!(scanner.scan("class Café:"), Some(Symbol::Type("Café".into())));
        assert_eq!(
            scanner.scan("    def naïve(self):"),
            Some(Symbol::Method {
                owner: "Café".into(),
                name: "naïve".into()
            })
        );
        assert_eq!(scanner.scan("def größe():"), Some(Symbol::Function("größe".into())));
    }

    #[test]
    fn test_scanner_async_def() {
        let mut scanner = SymbolScanner::new();
        scanner.scan("class Client:");
        assert_eq!(
            scanner.scan("    async def fetch(self):"),
            Some(Symbol::Method {
                owner: "Client".into(),
                name: "fetch".into()
            })
        );
    }

    #[test]
    fn test_extract_symbols_collects_all_kinds() {
        let symbols = extract_symbols(&[
            "class A:",
            "    def one(self):",
            "def free():",
            "    def nested():",
        ]);
        assert_eq!(symbols.types, vec!["A"]);
        assert_eq!(symbols.functions, vec!["free", "nested"]);
        assert_eq!(symbols.methods, vec![("A".to_string(), "one".to_string())]);
    }

    #[test]
    fn test_new_test_file() {
        let actions = classify_file(&record(
            "tests/test_foo.py",
            &["new file mode 100644", "+def test_a():", "+    assert True"],
        ));
        assert_eq!(actions, vec![Action::new(Category::AddTest, "Add new test file test_foo.py")]);
    }

    #[test]
    fn test_modified_test_file_variants() {
        let update = classify_file(&record("test_x.py", &["+    assert a", "-    assert b"]));
        assert_eq!(update[0].category, Category::UpdateTest);
        assert_eq!(update[0].text, "Update tests in test_x.py");

        let add = classify_file(&record("test_x.py", &["+    assert a"]));
        assert_eq!(add[0].category, Category::AddTest);

        let remove = classify_file(&record("test_x.py", &["-    assert b"]));
        assert_eq!(remove[0].category, Category::RemoveTest);

        assert!(classify_file(&record("test_x.py", &["+import os"])).is_empty());
    }

    #[test]
    fn test_test_file_skips_symbol_detection() {
        let actions = classify_file(&record("tests/helpers.py", &["+def build():"]));
        assert_eq!(texts(&actions), vec!["Add tests in helpers.py"]);
    }

    #[test]
    fn test_new_and_deleted_modules() {
        let added = classify_file(&record("pkg/util.py", &["new file mode 100644", "+def f():"]));
        assert_eq!(added, vec![Action::new(Category::AddModule, "Add new module util")]);

        let deleted = classify_file(&record("pkg/util.py", &["deleted file mode 100644", "-x = 1"]));
        assert_eq!(deleted, vec![Action::new(Category::RemoveModule, "Remove module util")]);
    }

    #[test]
    fn test_symbol_action_order() {
        let actions = classify_file(&record(
            "shapes.py",
            &[
                "@@ -1,5 +1,5 @@",
                "+    def area(self):",
                "+def make():",
                "+class Circle:",
                "+    def radius(self):",
                "-class Square:",
                "-    def side(self):",
                "-def old():",
            ],
        ));
        assert_eq!(
            texts(&actions),
            vec![
                "Add class Circle in shapes",
                "Remove class Square from shapes",
                "Add function area in shapes",
                "Add function make in shapes",
                "Remove function old from shapes",
                "Add method radius to class Circle in shapes",
                "Remove method side from class Square in shapes",
            ]
        );
    }

    #[test]
    fn test_fallback_actions() {
        let modify = classify_file(&record("m.py", &["+x = 2", "-x = 1"]));
        assert_eq!(modify, vec![Action::new(Category::ModifyCode, "Modify code in m")]);

        let add = classify_file(&record("m.py", &["+x = 2"]));
        assert_eq!(add, vec![Action::new(Category::AddCode, "Add code in m")]);

        let remove = classify_file(&record("m.py", &["-x = 1"]));
        assert_eq!(remove, vec![Action::new(Category::RemoveCode, "Remove code in m")]);
    }

    #[test]
    fn test_only_imports_and_comments_yield_nothing() {
        let actions = classify_file(&record(
            "m.py",
            &["@@ -1,0 +1,3 @@", "+import os", "+from sys import argv", "+# note"],
        ));
        assert!(actions.is_empty());
    }
}
