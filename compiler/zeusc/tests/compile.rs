//! End-to-end runs of the driver on files written to a temporary
//! directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use zeus_diagnostic::{ColorMode, ErrorCode};
use zeusc::commands::{check_file, compile_file};
use zeusc::{CompilationContext, CompileOptions};

fn succeeded(code: ExitCode) -> bool {
    format!("{code:?}") == format!("{:?}", ExitCode::SUCCESS)
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn options(output: PathBuf) -> CompileOptions {
    CompileOptions {
        color: ColorMode::Never,
        output,
        ..CompileOptions::default()
    }
}

fn compile(entry: &Path, options: CompileOptions) -> Result<String, Vec<ErrorCode>> {
    let mut ctx = CompilationContext::new(options);
    ctx.compile(entry)
        .ok_or_else(|| ctx.diagnostics().peek().map(|diag| diag.code).collect())
}

#[test]
fn declarations_and_arithmetic() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(
        dir.path(),
        "main.zs",
        "main :: proc() {\n  x : s32 = 5\n  y := x + 2\n}\n",
    );
    let asm = compile(&entry, options(dir.path().join("out.s"))).unwrap();

    let body: Vec<&str> = asm
        .lines()
        .skip_while(|line| *line != "_zeus_main:")
        .map(str::trim)
        .collect();
    assert_eq!(
        &body[..11],
        &[
            "_zeus_main:",
            "li x31, 65536",
            "sub x2, x2, x31",
            "mv x5, x2",
            "li x6, 5",
            "sw x6, 0(x5)",
            "li x7, 2",
            "add x7, x6, x7",
            "slli x7, x7, 32",
            "srai x7, x7, 32",
            "sw x7, 4(x5)",
        ]
    );
}

#[test]
fn compile_command_writes_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(dir.path(), "main.zs", "main :: proc() {}\n");
    let output = dir.path().join("prog.s");

    let code = compile_file(entry.to_str().unwrap(), &options(output.clone()));
    assert!(succeeded(code));
    let asm = fs::read_to_string(&output).unwrap();
    assert!(asm.starts_with(".global _zeus_main\n"));
    assert!(asm.contains("\n_zeus_main:\n"));
}

#[test]
fn failed_compile_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(dir.path(), "main.zs", "main :: proc() {\n  y = 1\n}\n");
    let output = dir.path().join("prog.s");

    let code = compile_file(entry.to_str().unwrap(), &options(output.clone()));
    assert!(!succeeded(code));
    assert!(!output.exists());
}

#[test]
fn imported_globals_and_strings_share_the_data_section() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "strings.zs",
        "hello := \"hi\"\nagain := \"hi\"\nwidth : u16 = 640\n",
    );
    let entry = write(
        dir.path(),
        "main.zs",
        "#import \"strings.zs\"\nmain :: proc() {\n  w := width\n}\n",
    );
    let asm = compile(&entry, options(dir.path().join("out.s"))).unwrap();

    assert_eq!(asm.matches("_L0: .ascii \"hi\"").count(), 1);
    assert!(!asm.contains("_L1:"));
    assert!(asm.contains("hello: .dword _L0\n"));
    assert!(asm.contains("again: .dword _L0\n"));
    assert!(asm.contains("width: .half 640\n"));
}

#[test]
fn command_line_stack_size_beats_the_directive() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(dir.path(), "main.zs", "#stack_size 16\nmain :: proc() {}\n");

    let asm = compile(&entry, options(dir.path().join("out.s"))).unwrap();
    assert!(asm.contains("    li x31, 16384\n"));

    let asm = compile(
        &entry,
        CompileOptions {
            stack_size: Some(2),
            ..options(dir.path().join("out.s"))
        },
    )
    .unwrap();
    assert!(asm.contains("    li x31, 2048\n"));
}

#[test]
fn parallel_loading_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.zs", "one :: proc() -> s32 {\n  return 1\n}\n");
    write(dir.path(), "b.zs", "two :: proc() -> s32 {\n  return 2\n}\n");
    write(dir.path(), "c.zs", "three :: proc() -> s32 {\n  return 3\n}\n");
    let entry = write(
        dir.path(),
        "main.zs",
        "#import \"a.zs\"\n#import \"b.zs\"\n#import \"c.zs\"\n\
         main :: proc() {\n  x := one()\n  y := two()\n  z := three()\n}\n",
    );

    let sequential = compile(&entry, options(dir.path().join("out.s"))).unwrap();
    let parallel = compile(
        &entry,
        CompileOptions {
            jobs: 4,
            ..options(dir.path().join("out.s"))
        },
    )
    .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn errors_stop_the_pipeline_with_their_codes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.s");

    let lex = write(dir.path(), "lex.zs", "x := 1 $ 2\n");
    assert_eq!(compile(&lex, options(out.clone())), Err(vec![ErrorCode::E1001]));

    let narrow = write(
        dir.path(),
        "narrow.zs",
        "main :: proc() {\n  a : u64 = 1\n  b : u8 = a\n}\n",
    );
    assert_eq!(compile(&narrow, options(out.clone())), Err(vec![ErrorCode::E3003]));

    let clash = write(
        dir.path(),
        "clash.zs",
        "foo := 1\nfoo :: proc() {\n}\nmain :: proc() {\n  foo()\n}\n",
    );
    assert_eq!(compile(&clash, options(out.clone())), Err(vec![ErrorCode::E3002]));

    write(dir.path(), "x.zs", "#import \"y.zs\"\n");
    write(dir.path(), "y.zs", "#import \"x.zs\"\n");
    let cycle = write(dir.path(), "cycle.zs", "#import \"x.zs\"\n");
    assert_eq!(compile(&cycle, options(out.clone())), Err(vec![ErrorCode::E9004]));

    let missing = dir.path().join("missing.zs");
    assert_eq!(compile(&missing, options(out)), Err(vec![ErrorCode::E9003]));
}

#[test]
fn check_command_accepts_valid_programs() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(
        dir.path(),
        "main.zs",
        "Point :: struct {\n  x : s32\n  y : s32\n}\nmain :: proc() {\n  p : Point = {1, 2}\n  p.x = p.y\n}\n",
    );
    let code = check_file(entry.to_str().unwrap(), &options(dir.path().join("out.s")));
    assert!(succeeded(code));
}
