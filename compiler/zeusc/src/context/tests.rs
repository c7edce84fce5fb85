use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use zeus_diagnostic::{ColorMode, ErrorCode};

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn plain_options() -> CompileOptions {
    CompileOptions {
        color: ColorMode::Never,
        ..CompileOptions::default()
    }
}

#[test]
fn stack_size_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let with_directive = write(dir.path(), "a.zs", "#stack_size 32\nmain :: proc() {}\n");
    let without = write(dir.path(), "b.zs", "main :: proc() {}\n");

    let mut ctx = CompilationContext::new(plain_options());
    let program = ctx.load(&with_directive).unwrap();
    assert_eq!(ctx.stack_size_kb(&program), 32);
    let program = ctx.load(&without).unwrap();
    assert_eq!(ctx.stack_size_kb(&program), DEFAULT_STACK_SIZE_KB);

    let mut ctx = CompilationContext::new(CompileOptions {
        stack_size: Some(256),
        ..plain_options()
    });
    let program = ctx.load(&with_directive).unwrap();
    assert_eq!(ctx.stack_size_kb(&program), 256);
}

#[test]
fn compile_produces_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(
        dir.path(),
        "main.zs",
        "#stack_size 8\nmain :: proc() {\n  x : s32 = 5\n}\n",
    );
    let mut ctx = CompilationContext::new(plain_options());
    let asm = ctx.compile(&entry).unwrap();
    assert!(asm.starts_with(".global _zeus_main\n.data\n.text\n"));
    assert!(asm.contains("    li x31, 8192\n"));
    assert!(!ctx.has_errors());
}

#[test]
fn check_errors_render_with_a_caret() {
    let dir = tempfile::tempdir().unwrap();
    let entry = write(dir.path(), "main.zs", "main :: proc() {\n  y := z + 1\n}\n");
    let mut ctx = CompilationContext::new(plain_options());
    assert!(ctx.compile(&entry).is_none());
    assert!(ctx.has_errors());

    let mut out = Vec::new();
    let errors = ctx.emit_diagnostics(&mut out, false);
    let out = String::from_utf8(out).unwrap();

    assert_eq!(errors, 1);
    assert!(out.starts_with("error[E3001]: Variable not defined\n"));
    assert!(out.contains("main.zs:2:8\n"));
    assert!(out.contains("2 |   y := z + 1\n"));
    assert!(out.contains("  |        ^\n"));
    assert!(out.ends_with("error: aborting due to previous error\n"));
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn diagnostics_flush_most_recent_first() {
    let mut ctx = CompilationContext::new(plain_options());
    ctx.report(Diagnostic::error(ErrorCode::E9003).with_message("first"));
    ctx.report(Diagnostic::error(ErrorCode::E9004).with_message("second"));

    let mut out = Vec::new();
    assert_eq!(ctx.emit_diagnostics(&mut out, false), 2);
    let out = String::from_utf8(out).unwrap();
    let second = out.find("second").unwrap();
    let first = out.find("first").unwrap();
    assert!(second < first);
    assert!(out.ends_with("error: aborting due to 2 previous errors\n"));
}

#[test]
fn overflowing_errors_are_summarized() {
    let mut ctx = CompilationContext::new(plain_options());
    for n in 0..12 {
        ctx.report(Diagnostic::error(ErrorCode::E9001).with_message(format!("bug {n}")));
    }
    let mut out = Vec::new();
    assert_eq!(ctx.emit_diagnostics(&mut out, false), 11);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("error[E9002]: error limit of 10 reached\n"));
    assert!(out.contains("2 further error(s) not shown"));
}

#[test]
fn unreadable_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = CompilationContext::new(plain_options());
    assert!(ctx.read_source(&dir.path().join("missing.zs")).is_none());
    let diagnostic = ctx.diagnostics().peek().next().unwrap();
    assert_eq!(diagnostic.code, ErrorCode::E9003);
}
