// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQL keyword sets consulted by identifier safety checks (spec.md §4.B).

pub const SQL_RESERVED_KEYWORDS: &[&str] = &[
    "select", "insert", "update", "delete", "create", "drop", "alter", "table", "index", "view",
    "database", "schema", "user", "group", "role", "grant", "revoke", "commit", "rollback",
    "transaction", "begin", "end", "if", "else", "case", "when", "then", "where", "order", "by",
    "having", "limit", "offset", "join", "inner", "outer", "left", "right", "full", "cross", "on",
    "using", "union", "intersect", "except", "distinct", "all", "exists", "in", "not", "null",
    "true", "false", "and", "or", "between", "like", "ilike", "similar", "regexp", "is", "as",
    "asc", "desc", "primary", "key", "foreign", "references", "unique", "check", "constraint",
    "default", "auto_increment", "serial", "bigserial", "smallserial",
];

pub const POSTGRES_TYPE_KEYWORDS: &[&str] = &[
    "integer", "int", "int4", "bigint", "int8", "smallint", "int2", "decimal", "numeric", "real",
    "float4", "double", "float8", "serial", "bigserial", "smallserial", "money", "char", "varchar",
    "character", "text", "bytea", "timestamp", "timestamptz", "date", "time", "timetz",
    "interval", "boolean", "bool", "point", "line", "lseg", "box", "path", "polygon", "circle",
    "cidr", "inet", "macaddr", "bit", "varbit", "uuid", "xml", "json", "jsonb", "array",
    "int4range", "int8range", "numrange", "tsrange", "tstzrange", "daterange",
];

pub fn is_reserved(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    SQL_RESERVED_KEYWORDS.contains(&lower.as_str())
}

pub fn is_postgres_type(identifier: &str) -> bool {
    let lower = identifier.to_ascii_lowercase();
    POSTGRES_TYPE_KEYWORDS.contains(&lower.as_str())
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod tests;
