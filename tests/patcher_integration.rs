//! Integration tests for running patch tables against a project tree
//!
//! Builds a throwaway Next.js-style tree and checks file contents and report
//! counts after one and two runs.

use batch_patcher::config::{
    apply_table, load_from_str, FileEntry, FileStatus, PatchTable, ReplacementRule, LINE_SEPARATOR,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROLE_ROUTE: &str = "import { NextResponse } from 'next/server';\nimport { prisma } from '@/lib/prisma';\nimport { authorize, Permission, Role } from '@/lib/auth';\n\nexport async function GET() {\n  return NextResponse.json({});\n}\n";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn adjust_route() -> String {
    [
        "import { NextResponse } from 'next/server';",
        "import { { createRouteHandlerClient } } from '@supabase/auth-helpers-nextjs';",
        "import { { cookies } } from 'next/headers';",
        "import { { Role } } from '@prisma/client';",
        "",
        "export async function POST(req: Request) {",
        "  const user = await authorize(req, 'inventory:adjust');",
        "  return NextResponse.json({ ok: true });",
        "}",
        "",
    ]
    .join(LINE_SEPARATOR)
}

fn users_route() -> String {
    [
        "import { authorize, Role } from '@/lib/auth';",
        "",
        "export async function GET() {",
        "  const supabase = createRouteHandlerClient({ { cookies } });",
        "  return Response.json([]);",
        "}",
        "",
    ]
    .join(LINE_SEPARATOR)
}

/// Every built-in target present on disk.
fn setup_builtin_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let table = PatchTable::builtin();

    for entry in &table.files {
        let content = match entry.path.as_str() {
            "src/app/api/inventory/adjust/route.ts" => adjust_route(),
            "src/app/api/users/route.ts" => users_route(),
            _ => ROLE_ROUTE.to_string(),
        };
        write(dir.path(), &entry.path, &content);
    }

    dir
}

#[test]
fn test_builtin_table_full_run() {
    let workspace = setup_builtin_workspace();
    let table = PatchTable::builtin();

    let report = apply_table(&table, workspace.path());

    assert_eq!(report.files.len(), table.len());
    assert_eq!(report.files_modified(), table.len());
    // 7 role-only entries, sessions matches 1 of 3 rules, adjust 4 of 4, users 2 of 2.
    assert_eq!(report.total_changes(), 7 + 1 + 4 + 2);

    let adjust =
        fs::read_to_string(workspace.path().join("src/app/api/inventory/adjust/route.ts")).unwrap();
    let expected = [
        "import { NextResponse } from 'next/server';",
        "",
        "export async function POST(req: Request) {",
        "  await authorize(req, 'inventory:adjust');",
        "  return NextResponse.json({ ok: true });",
        "}",
        "",
    ]
    .join(LINE_SEPARATOR);
    assert_eq!(adjust, expected);

    let billing =
        fs::read_to_string(workspace.path().join("src/app/api/billing/payments/route.ts")).unwrap();
    assert!(billing.contains("import { authorize, Permission } from '@/lib/auth';"));
    assert!(!billing.contains(", Role"));
}

#[test]
fn test_builtin_table_is_idempotent() {
    let workspace = setup_builtin_workspace();
    let table = PatchTable::builtin();

    let first = apply_table(&table, workspace.path());
    assert!(first.files_modified() > 0);

    let snapshot: Vec<Vec<u8>> = table
        .files
        .iter()
        .map(|f| fs::read(workspace.path().join(&f.path)).unwrap())
        .collect();

    let second = apply_table(&table, workspace.path());
    assert_eq!(second.total_changes(), 0);
    assert_eq!(second.files_modified(), 0);
    assert!(second
        .files
        .iter()
        .all(|f| f.status == FileStatus::Unchanged));

    for (entry, before) in table.files.iter().zip(snapshot) {
        assert_eq!(fs::read(workspace.path().join(&entry.path)).unwrap(), before);
    }
}

#[test]
fn test_missing_targets_are_reported_and_not_created() {
    let workspace = TempDir::new().unwrap();
    let table = PatchTable::builtin();

    let report = apply_table(&table, workspace.path());

    assert!(report.files.iter().all(|f| f.status == FileStatus::NotFound));
    assert_eq!(report.total_changes(), 0);
    assert_eq!(report.files_modified(), 0);
    for entry in &table.files {
        assert!(!workspace.path().join(&entry.path).exists());
    }
}

#[test]
fn test_import_line_removed_other_lines_byte_identical() {
    let workspace = TempDir::new().unwrap();
    let content = "import { { cookies } } from 'next/headers';\r\nconst a = 1;\r\n\n  const b = 2;\t\r\n";
    write(workspace.path(), "route.ts", content);

    let table = PatchTable::new(vec![FileEntry::new(
        "route.ts",
        vec![ReplacementRule::new(
            "import { { cookies } } from 'next/headers';\r\n",
            "",
        )],
    )]);

    let report = apply_table(&table, workspace.path());
    assert_eq!(report.files_modified(), 1);
    assert_eq!(
        fs::read(workspace.path().join("route.ts")).unwrap(),
        b"const a = 1;\r\n\n  const b = 2;\t\r\n"
    );
}

#[test]
fn test_files_modified_counts_changed_entries_only() {
    let workspace = TempDir::new().unwrap();
    write(workspace.path(), "a.ts", "x, Role");
    write(workspace.path(), "b.ts", "nothing here");
    write(workspace.path(), "c.ts", "swap");

    let table = load_from_str(
        r#"
[[files]]
path = "a.ts"
[[files.rules]]
find = ", Role"

[[files]]
path = "b.ts"
[[files.rules]]
find = ", Role"

[[files]]
path = "c.ts"
[[files.rules]]
find = "swap"
replace = "tmp"
[[files.rules]]
find = "tmp"
replace = "swap"

[[files]]
path = "missing.ts"
[[files.rules]]
find = ", Role"
"#,
    )
    .unwrap();

    let report = apply_table(&table, workspace.path());

    assert_eq!(report.files_modified(), 1);
    assert!(report.files_modified() <= table.len());
    assert_eq!(report.total_changes(), 3);
    assert_eq!(
        fs::read_to_string(workspace.path().join("b.ts")).unwrap(),
        "nothing here"
    );
    assert_eq!(fs::read_to_string(workspace.path().join("c.ts")).unwrap(), "swap");
    assert_eq!(report.files[3].status, FileStatus::NotFound);
}

#[test]
fn test_report_order_follows_table_order() {
    let workspace = TempDir::new().unwrap();
    let table = PatchTable::new(vec![
        FileEntry::new("z.ts", vec![]),
        FileEntry::new("a.ts", vec![]),
        FileEntry::new("m.ts", vec![]),
    ]);

    let report = apply_table(&table, workspace.path());
    let order: Vec<&str> = report.files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(order, vec!["z.ts", "a.ts", "m.ts"]);
}
