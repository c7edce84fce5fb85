use super::*;
use pretty_assertions::assert_eq;
use zeus_ir::{ExprKind, FileId, Span, StmtId, StmtKind, StructId, Type};

/// Parse `files` (entry first) into a program, wiring `#import`s by name.
fn build(files: &[(&str, &str)], interner: &StringInterner) -> Program {
    let mut program = Program::new();
    for (name, source) in files {
        let tokens = zeus_lexer::lex(source).unwrap();
        let module = zeus_parse::parse(&tokens, source, interner).unwrap();
        program.add_file(*name, module);
    }
    for index in 0..program.len() {
        let deps = program.files[index]
            .module
            .imports
            .iter()
            .map(|import| {
                let path = interner.lookup(import.path);
                let position = files.iter().position(|(name, _)| *name == path).unwrap();
                FileId::new(u32::try_from(position).unwrap())
            })
            .collect();
        program.files[index].deps = deps;
    }
    program
}

struct Checked {
    program: Program,
    checked: CheckedProgram,
    interner: StringInterner,
}

impl Checked {
    /// Type recorded for the declaration target named `name`, searching
    /// every file.
    fn decl(&self, name: &str) -> TypeInfo {
        for file in &self.program.files {
            let arena = &file.module.arena;
            for index in 0..arena.stmt_count() {
                let stmt = arena.stmt(StmtId::new(u32::try_from(index).unwrap()));
                let StmtKind::Decl { targets, .. } = &stmt.kind else {
                    continue;
                };
                for &target in arena.expr_list(*targets) {
                    if let ExprKind::Var { name: var, .. } = arena.expr(target).kind {
                        if self.interner.lookup(var) == name {
                            return self.checked.file(file.id).expr(target).unwrap();
                        }
                    }
                }
            }
        }
        panic!("no declaration of {name}");
    }
}

fn check_files(files: &[(&str, &str)]) -> Result<Checked, CheckError> {
    let interner = StringInterner::new();
    let program = build(files, &interner);
    let checked = check_program(&program, &interner)?;
    Ok(Checked {
        program,
        checked,
        interner,
    })
}

fn check(source: &str) -> Checked {
    match check_files(&[("main.zs", source)]) {
        Ok(checked) => checked,
        Err(err) => panic!("unexpected error {err} at {:?} in {source:?}", err.span),
    }
}

fn check_err(source: &str) -> CheckError {
    match check_files(&[("main.zs", source)]) {
        Ok(_) => panic!("expected a check error for {source:?}"),
        Err(err) => err,
    }
}

fn scalar(ty: Type) -> TypeInfo {
    TypeInfo::builtin(ty)
}

fn pointer(ty: Type, depth: u8) -> TypeInfo {
    TypeInfo {
        ty,
        pointer_depth: depth,
        size_bits: 64,
    }
}

// Widening

#[test]
fn comp_integer_widens_into_u8() {
    let checked = check("main :: proc() {\n  x : u8 = 200\n}\n");
    assert_eq!(checked.decl("x"), scalar(Type::U8));
}

#[test]
fn u64_into_u8_needs_a_cast() {
    let source = "main :: proc() {\n  a : u64 = 1\n  b : u8 = a\n}\n";
    let err = check_err(source);
    assert_eq!(err.kind, CheckErrorKind::ExplicitCast);
    assert_eq!(err.to_string(), "Explicit cast required");
    let offset = u32::try_from(source.rfind('a').unwrap()).unwrap();
    assert_eq!(err.span, Span::new(offset, offset + 1));
}

#[test]
fn narrow_value_into_wide_slot() {
    let checked = check("main :: proc() {\n  a : u8 = 1\n  b : s64 = a\n}\n");
    assert_eq!(checked.decl("b"), scalar(Type::S64));
}

#[test]
fn inferred_declaration_takes_the_lower_rank() {
    let checked = check("main :: proc() {\n  x : s32 = 5\n  y := x + 2\n}\n");
    assert_eq!(checked.decl("y"), scalar(Type::S32));
}

#[test]
fn pointer_depth_must_match() {
    let err = check_err("main :: proc() {\n  p : ^s32 = 5\n}\n");
    assert_eq!(err.kind, CheckErrorKind::PointerDepthMismatch);
}

#[test]
fn strings_do_not_convert_to_numbers() {
    let err = check_err("main :: proc() {\n  x : s64 = \"no\"\n}\n");
    assert_eq!(
        err.kind,
        CheckErrorKind::TypeMismatch {
            expected: "s64".into(),
            found: "compile-time string".into()
        }
    );
}

// Scopes

#[test]
fn inner_scope_shadows_outer() {
    let source = "main :: proc() {\n\
                  \x20 x : s32 = 1\n\
                  \x20 if x {\n\
                  \x20   x : u8 = 2\n\
                  \x20   inner := x\n\
                  \x20 }\n\
                  \x20 outer := x\n\
                  }\n";
    let checked = check(source);
    assert_eq!(checked.decl("inner"), scalar(Type::U8));
    assert_eq!(checked.decl("outer"), scalar(Type::S32));
}

#[test]
fn redeclaring_in_the_same_scope_fails() {
    let err = check_err("main :: proc() {\n  x := 1\n  x := 2\n}\n");
    assert_eq!(err.kind, CheckErrorKind::Redefinition);
    assert_eq!(err.span, Span::new(28, 29));
}

#[test]
fn block_variables_end_with_the_block() {
    let err = check_err("main :: proc() {\n  for {\n    t := 1\n  }\n  t = 2\n}\n");
    assert_eq!(err.kind, CheckErrorKind::VariableNotDefined);
}

#[test]
fn assigning_an_undefined_variable() {
    let err = check_err("main :: proc() {\n  x = 1\n}\n");
    assert_eq!(err.to_string(), "Variable not defined");
    assert_eq!(err.code(), zeus_diagnostic::ErrorCode::E3001);
}

// Structures

const POINT: &str = "Point :: struct {\n  x : s32\n  y : s32\n}\n";

#[test]
fn field_access_resolves_member_type() {
    let checked = check(&format!("{POINT}main :: proc() {{\n  p : Point\n  a := p.x\n}}\n"));
    assert_eq!(checked.decl("a"), scalar(Type::S32));
}

#[test]
fn missing_field_is_reported() {
    let err = check_err(&format!("{POINT}main :: proc() {{\n  p : Point\n  a := p.z\n}}\n"));
    assert_eq!(
        err.to_string(),
        "z does not belong to the defined structure"
    );
    assert_eq!(err.code(), zeus_diagnostic::ErrorCode::E3005);
}

#[test]
fn struct_layout_is_packed() {
    let checked = check("Mixed :: struct {\n  a : u8\n  b : s64\n  c : u16\n}\n");
    let entity = checked.checked.structs.get(StructId::new(0));
    let offsets: Vec<u64> = entity.members.iter().map(|m| m.offset_bits).collect();
    assert_eq!(offsets, vec![0, 8, 72]);
    assert_eq!(entity.size_bits, 88);
}

#[test]
fn nested_struct_fields() {
    let source = format!(
        "{POINT}Line :: struct {{\n  from : Point\n  to : ^Point\n}}\n\
         main :: proc() {{\n  l : Line\n  a := l.from.y\n  b := l.to^.x\n}}\n"
    );
    let checked = check(&source);
    assert_eq!(checked.decl("a"), scalar(Type::S32));
    assert_eq!(checked.decl("b"), scalar(Type::S32));
    let line = checked.checked.structs.get(StructId::new(1));
    assert_eq!(line.size_bits, 128);
}

#[test]
fn struct_may_point_to_itself() {
    let checked = check("Node :: struct {\n  value : s64\n  next : ^Node\n}\n");
    assert_eq!(checked.checked.structs.get(StructId::new(0)).size_bits, 128);
}

#[test]
fn struct_may_not_contain_itself() {
    let err = check_err("Node :: struct {\n  next : Node\n}\n");
    assert_eq!(err.kind, CheckErrorKind::RecursiveStructure);
}

#[test]
fn struct_body_rejects_initializers() {
    let err = check_err("S :: struct {\n  a : s32 = 1\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InvalidStructBody);
}

#[test]
fn struct_defined_twice() {
    let err = check_err("S :: struct {\n  a : s32\n}\nS :: struct {\n  b : s32\n}\n");
    assert_eq!(err.kind, CheckErrorKind::StructureRedefinition);
}

#[test]
fn unknown_struct_type() {
    let err = check_err("main :: proc() {\n  p : Shape\n}\n");
    assert_eq!(err.to_string(), "Structure not defined");
}

#[test]
fn initializer_lists() {
    let ok = check(&format!("{POINT}main :: proc() {{\n  p : Point = {{1, 2}}\n}}\n"));
    assert!(ok.decl("p").is_struct_value());

    let err = check_err(&format!("{POINT}main :: proc() {{\n  p : Point = {{1}}\n}}\n"));
    assert_eq!(
        err.to_string(),
        "Structure has 2 members but the initializer provides 1"
    );

    let err = check_err("main :: proc() {\n  x := {1, 2}\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InitListNotAllowed);
}

#[test]
fn structures_are_not_operands() {
    let err = check_err(&format!("{POINT}main :: proc() {{\n  p : Point\n  q := p + 1\n}}\n"));
    assert_eq!(
        err.to_string(),
        "Cannot perform binary operation with structures"
    );
}

#[test]
fn structures_are_not_conditions() {
    let err = check_err(&format!("{POINT}main :: proc() {{\n  p : Point\n  if p {{\n  }}\n}}\n"));
    assert_eq!(err.kind, CheckErrorKind::InvalidCondition);
}

// Pointers

#[test]
fn pointer_arithmetic_keeps_the_pointer() {
    let checked = check("main :: proc(p: ^u8) {\n  q := p + 1\n  v := q^\n}\n");
    assert_eq!(checked.decl("q"), pointer(Type::U8, 1));
    assert_eq!(checked.decl("v"), scalar(Type::U8));
}

#[test]
fn two_pointers_cannot_be_combined() {
    let err = check_err("main :: proc(p: ^u8, q: ^u8) {\n  r := p + q\n}\n");
    assert_eq!(err.to_string(), "Cannot perform binary operation with 2 pointers");
}

#[test]
fn pointer_multiplication_is_rejected() {
    let err = check_err("main :: proc(p: ^u8) {\n  r := p * 2\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InvalidPointerArithmetic);
}

#[test]
fn dereferencing_a_value_fails() {
    let err = check_err("main :: proc() {\n  x : s64 = 1\n  y := x^\n}\n");
    assert_eq!(err.to_string(), "Cannot dereference a non-pointer");
}

#[test]
fn indexing() {
    let checked = check("main :: proc(p: ^^s32) {\n  a := p[2]\n}\n");
    assert_eq!(checked.decl("a"), pointer(Type::S32, 1));

    let err = check_err("main :: proc(x: s32) {\n  a := x[1]\n}\n");
    assert_eq!(err.kind, CheckErrorKind::IndexNonPointer);

    let err = check_err("main :: proc(p: ^s32) {\n  a := p[1.5]\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InvalidIndex);
}

// Procedures

const PAIR: &str = "pair :: proc() -> (s64, s64): return 1, 2\n";

#[test]
fn multi_target_declaration_from_call() {
    let checked = check(&format!("{PAIR}main :: proc() {{\n  a, b := pair()\n}}\n"));
    assert_eq!(checked.decl("a"), scalar(Type::S64));
    assert_eq!(checked.decl("b"), scalar(Type::S64));
}

#[test]
fn multi_assign_arity() {
    let source = format!("{PAIR}main :: proc() {{\n  a, b, c : s64\n  a, b, c = pair()\n}}\n");
    assert_eq!(
        check_err(&source).to_string(),
        "RHS returns less than what LHS can catch"
    );

    let source = format!("{PAIR}main :: proc() {{\n  a : s64\n  a = pair()\n}}\n");
    assert_eq!(check_err(&source).kind, CheckErrorKind::NotSingleValue);

    let source = "triple :: proc() -> (s64, s64, s64): return 1, 2, 3\n\
                  main :: proc() {\n  a, b := triple()\n}\n";
    assert_eq!(
        check_err(source).to_string(),
        "RHS returns more than what LHS can catch"
    );
}

#[test]
fn multi_target_needs_a_call() {
    let err = check_err("main :: proc() {\n  a, b : s64\n  a, b = 1\n}\n");
    assert_eq!(err.kind, CheckErrorKind::MultiTargetNeedsCall);
}

#[test]
fn argument_count_is_checked() {
    let err = check_err("f :: proc(a: s64) {\n}\nmain :: proc() {\n  f(1, 2)\n}\n");
    assert_eq!(
        err.to_string(),
        "Procedure defined with 1 input but you provided 2 inputs"
    );
}

#[test]
fn argument_types_are_checked() {
    let err = check_err("f :: proc(a: u8) {\n}\nmain :: proc(x: s64) {\n  f(x)\n}\n");
    assert_eq!(err.kind, CheckErrorKind::ExplicitCast);
}

#[test]
fn call_statement_discards_outputs() {
    check(&format!("{PAIR}main :: proc() {{\n  pair()\n}}\n"));
}

#[test]
fn recursion_sees_its_own_signature() {
    check("fact :: proc(n: s64) -> s64 {\n  return n * fact(n - 1)\n}\n");
}

#[test]
fn calling_an_unknown_procedure() {
    let err = check_err("main :: proc() {\n  g()\n}\n");
    assert_eq!(err.kind, CheckErrorKind::ProcedureNotDefined);
}

#[test]
fn declaration_then_definition() {
    check("f :: proc(a: s64) -> s64\nf :: proc(a: s64) -> s64: return a\n");

    let err = check_err("f :: proc(a: s64)\nf :: proc(a: u8) {\n}\n");
    assert_eq!(err.kind, CheckErrorKind::SignatureMismatch);

    let err = check_err("f :: proc() {\n}\nf :: proc() {\n}\n");
    assert_eq!(err.kind, CheckErrorKind::ProcedureRedefinition);
}

#[test]
fn procedures_only_at_global_scope() {
    let err = check_err("main :: proc() {\n  inner :: proc() {\n  }\n}\n");
    assert_eq!(err.kind, CheckErrorKind::NestedProcedure);
}

#[test]
fn inputs_have_no_defaults() {
    let err = check_err("f :: proc(a: s64 = 1) {\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InputDefault);
}

#[test]
fn return_must_match_outputs() {
    let err = check_err("f :: proc() -> s64 {\n  return\n}\n");
    assert_eq!(err.to_string(), "Procedure returns 1 value but 0 were provided");

    let err = check_err("f :: proc() -> u8 {\n  x : s64 = 1\n  return x\n}\n");
    assert_eq!(err.kind, CheckErrorKind::ExplicitCast);
}

#[test]
fn procedure_table_records_signatures() {
    let checked = check("add :: proc(a: s32, b: ^u8) -> s32: return a\n");
    let add = checked.checked.proc(checked.interner.intern("add")).unwrap();
    assert_eq!(add.inputs.as_slice(), &[scalar(Type::S32), pointer(Type::U8, 1)]);
    assert_eq!(add.outputs.as_slice(), &[scalar(Type::S32)]);
    assert!(add.defined);
}

// Loops

#[test]
fn counted_loop_iterator() {
    let checked = check("main :: proc(n: u8) {\n  for i := 0 ... n {\n    x := i\n  }\n}\n");
    assert_eq!(checked.decl("x"), scalar(Type::U8));

    let checked = check("main :: proc() {\n  for i : s16 = 0 ... 10 .. 2 {\n    y := i\n  }\n}\n");
    assert_eq!(checked.decl("y"), scalar(Type::S16));
}

#[test]
fn iterator_must_be_new() {
    let err = check_err("main :: proc() {\n  i := 1\n  for i := 0 ... 3 {\n  }\n}\n");
    assert_eq!(err.to_string(), "Iterator defined before");
}

#[test]
fn range_bounds_must_agree() {
    let err = check_err("main :: proc(a: s32, b: u8) {\n  for i := a ... b {\n  }\n}\n");
    assert_eq!(err.kind, CheckErrorKind::RangeMismatch);
}

#[test]
fn step_must_be_a_number() {
    let err = check_err("main :: proc(p: ^u8) {\n  for i := 0 ... 3 .. p {\n  }\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InvalidStep);
}

#[test]
fn decimal_iterator_is_rejected() {
    let err = check_err("main :: proc() {\n  for i := 0.5 ... 3.5 {\n  }\n}\n");
    assert_eq!(err.kind, CheckErrorKind::InvalidIterator);
}

// Globals

#[test]
fn globals_are_hoisted() {
    let checked = check("limit : u8 = 10\nratio := 1.5\nletter := 'a'\n");
    let globals = &checked.checked.globals;
    assert_eq!(globals.len(), 3);
    assert_eq!(globals[0].init, GlobalInit::Int(10));
    assert_eq!(globals[0].info, scalar(Type::U8));
    assert_eq!(globals[1].init, GlobalInit::Decimal(1.5));
    assert_eq!(globals[2].init, GlobalInit::Char(b'a'));
}

#[test]
fn identical_strings_share_a_pool_slot() {
    let checked = check("a := \"hello\"\nb := \"hello\"\nc := \"world\"\n");
    let program = &checked.checked;
    assert_eq!(program.strings.len(), 2);
    let inits: Vec<GlobalInit> = program.globals.iter().map(|g| g.init).collect();
    assert_eq!(
        inits,
        vec![GlobalInit::Str(0), GlobalInit::Str(0), GlobalInit::Str(1)]
    );
}

#[test]
fn string_literals_in_bodies_are_pooled() {
    let checked = check("main :: proc() {\n  s := \"hi\"\n}\n");
    assert_eq!(checked.checked.strings.len(), 1);
}

#[test]
fn global_initializer_must_be_literal() {
    let err = check_err("x := 1 + 2\n");
    assert_eq!(err.kind, CheckErrorKind::GlobalNotLiteral);
    let err = check_err("x : s64\n");
    assert_eq!(err.kind, CheckErrorKind::GlobalNotLiteral);
}

#[test]
fn only_items_at_global_scope() {
    let err = check_err("x := 1\nif x {\n}\n");
    assert_eq!(err.to_string(), "if statements are not allowed at global scope");
}

#[test]
fn global_declared_in_two_files() {
    let err = check_files(&[
        ("main.zs", "#import \"a.zs\"\ncount := 1\n"),
        ("a.zs", "count := 2\n"),
    ])
    .err()
    .unwrap();
    assert_eq!(
        err.to_string(),
        "Variable already declared at global scope in a.zs"
    );
    assert_eq!(err.file, FileId::new(0));
}

#[test]
fn globals_and_procedures_share_one_namespace() {
    let err = check_err("foo := 1\nfoo :: proc() {\n}\n");
    assert_eq!(err.kind, CheckErrorKind::GlobalProcedureClash);
    assert_eq!(err.code(), zeus_diagnostic::ErrorCode::E3002);

    let err = check_err("foo :: proc() {\n}\nfoo := 1\n");
    assert_eq!(err.kind, CheckErrorKind::GlobalProcedureClash);

    let err = check_files(&[
        ("main.zs", "#import \"a.zs\"\ntick :: proc() {\n}\n"),
        ("a.zs", "tick := 2\n"),
    ])
    .err()
    .unwrap();
    assert_eq!(err.kind, CheckErrorKind::GlobalProcedureClash);
    assert_eq!(err.file, FileId::new(0));
}

#[test]
fn generated_label_names_are_reserved() {
    let err = check_err("_L0 := 7\ns := \"hi\"\n");
    assert_eq!(
        err.to_string(),
        "'_L0' is reserved for compiler generated labels"
    );
    let err = check_err("_zeus_main :: proc() {\n}\n");
    assert_eq!(
        err.kind,
        CheckErrorKind::ReservedName {
            name: "_zeus_main".into()
        }
    );

    // Only the exact label shapes are taken.
    check("_L := 1\n_Lx := 2\n_L1a := 3\n");
}

// Imports

#[test]
fn imports_are_checked_first() {
    let checked = check_files(&[
        ("main.zs", "#import \"math.zs\"\nmain :: proc() {\n  x := square(limit)\n}\n"),
        ("math.zs", "limit : s32 = 4\nsquare :: proc(v: s32) -> s32: return v * v\n"),
    ])
    .unwrap();
    assert_eq!(checked.checked.order, vec![FileId::new(1), FileId::new(0)]);
    assert_eq!(checked.decl("x"), scalar(Type::S32));
}

#[test]
fn imports_are_not_transitive() {
    let err = check_files(&[
        ("main.zs", "#import \"a.zs\"\nmain :: proc() {\n  helper()\n}\n"),
        ("a.zs", "#import \"b.zs\"\n"),
        ("b.zs", "helper :: proc() {\n}\n"),
    ])
    .err()
    .unwrap();
    assert_eq!(err.kind, CheckErrorKind::ProcedureNotDefined);
}

#[test]
fn structures_are_program_wide() {
    let checked = check_files(&[
        ("main.zs", "#import \"shapes.zs\"\nmain :: proc() {\n  p : Point\n  a := p.y\n}\n"),
        ("shapes.zs", POINT),
    ])
    .unwrap();
    assert_eq!(checked.decl("a"), scalar(Type::S32));
}

#[test]
fn import_cycle_is_an_error() {
    let err = check_files(&[
        ("main.zs", "#import \"a.zs\"\n"),
        ("a.zs", "#import \"main.zs\"\n"),
    ])
    .err()
    .unwrap();
    assert_eq!(
        err.kind,
        CheckErrorKind::ImportCycle {
            file: "main.zs".into()
        }
    );
}
