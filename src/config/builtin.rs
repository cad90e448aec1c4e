//! The compiled-in cleanup table.
//!
//! Removes the unused `Role` imports and the leftover Supabase/cookies
//! imports from the API routes after the auth refactor.

use crate::config::schema::{FileEntry, Metadata, PatchTable, ReplacementRule};

/// A full source line, terminated by the platform line separator.
#[cfg(not(windows))]
macro_rules! source_line {
    ($text:literal) => {
        concat!($text, "\n")
    };
}

#[cfg(windows)]
macro_rules! source_line {
    ($text:literal) => {
        concat!($text, "\r\n")
    };
}

/// Platform line separator used by the line-removal rules.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

const ROLE_IN_IMPORT: (&str, &str) = (", Role", "");
const SUPABASE_IMPORT: (&str, &str) = (
    source_line!("import { { createRouteHandlerClient } } from '@supabase/auth-helpers-nextjs';"),
    "",
);
const COOKIES_IMPORT: (&str, &str) = (
    source_line!("import { { cookies } } from 'next/headers';"),
    "",
);
const PRISMA_ROLE_IMPORT: (&str, &str) = (
    source_line!("import { { Role } } from '@prisma/client';"),
    "",
);
const UNUSED_USER_BINDING: (&str, &str) = ("const user = await authorize", "await authorize");
const SUPABASE_CLIENT: (&str, &str) = (
    source_line!("  const supabase = createRouteHandlerClient({ { cookies } });"),
    "",
);

pub static BUILTIN_TABLE: &[(&str, &[(&str, &str)])] = &[
    (
        "src/app/api/billing/credit-notes/route.ts",
        &[ROLE_IN_IMPORT],
    ),
    ("src/app/api/billing/invoices/route.ts", &[ROLE_IN_IMPORT]),
    ("src/app/api/billing/payments/route.ts", &[ROLE_IN_IMPORT]),
    (
        "src/app/api/billing/reconciliation/route.ts",
        &[ROLE_IN_IMPORT],
    ),
    (
        "src/app/api/cash-register-sessions/route.ts",
        &[ROLE_IN_IMPORT, SUPABASE_IMPORT, COOKIES_IMPORT],
    ),
    ("src/app/api/cash-registers/route.ts", &[ROLE_IN_IMPORT]),
    (
        "src/app/api/cash-registers/[id]/close-session/route.ts",
        &[ROLE_IN_IMPORT],
    ),
    (
        "src/app/api/cash-registers/[id]/movements/route.ts",
        &[ROLE_IN_IMPORT],
    ),
    (
        "src/app/api/inventory/adjust/route.ts",
        &[
            SUPABASE_IMPORT,
            COOKIES_IMPORT,
            PRISMA_ROLE_IMPORT,
            UNUSED_USER_BINDING,
        ],
    ),
    (
        "src/app/api/users/route.ts",
        &[ROLE_IN_IMPORT, SUPABASE_CLIENT],
    ),
];

impl PatchTable {
    /// Owned copy of [`BUILTIN_TABLE`].
    pub fn builtin() -> Self {
        let files = BUILTIN_TABLE
            .iter()
            .map(|(path, rules)| {
                FileEntry::new(
                    *path,
                    rules
                        .iter()
                        .map(|(find, replace)| ReplacementRule::new(*find, *replace))
                        .collect(),
                )
            })
            .collect();

        Self {
            meta: Metadata {
                name: "unused-code-cleaner".to_string(),
                description: Some(
                    "Remove unused imports left behind by the auth refactor".to_string(),
                ),
            },
            files,
        }
    }
}
