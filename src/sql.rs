//! Fixed, parameterized statements. Identifiers are literals here; every value is a bind parameter.
//!
//! Monetary columns are `NUMERIC(10,2)`: writes bind `f64` (assignment cast), reads cast to `float8`.

pub const CREATE_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        nome VARCHAR(100) NOT NULL,
        preco NUMERIC(10,2) NOT NULL
    )
"#;

pub const CREATE_BILLS: &str = r#"
    CREATE TABLE IF NOT EXISTS bills (
        id BYTEA PRIMARY KEY CHECK (octet_length(id) = 16),
        embasa NUMERIC(10,2) NOT NULL,
        coelba NUMERIC(10,2) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

pub const INSERT_ITEM: &str = "INSERT INTO items (nome, preco) VALUES ($1, $2) RETURNING id";
pub const SELECT_ITEMS: &str = "SELECT id, nome, preco::float8 FROM items ORDER BY id";
pub const SELECT_ITEM: &str = "SELECT id, nome, preco::float8 FROM items WHERE id = $1";
pub const UPDATE_ITEM: &str = "UPDATE items SET nome = $1, preco = $2 WHERE id = $3";
pub const DELETE_ITEM: &str = "DELETE FROM items WHERE id = $1";

pub const INSERT_BILL: &str =
    "INSERT INTO bills (id, embasa, coelba) VALUES ($1, $2, $3) RETURNING created_at, updated_at";
pub const SELECT_BILLS: &str = "SELECT id, embasa::float8, coelba::float8, created_at, updated_at \
     FROM bills ORDER BY created_at, id";
pub const SELECT_BILL: &str = "SELECT id, embasa::float8, coelba::float8, created_at, updated_at \
     FROM bills WHERE id = $1";
/// `created_at` is never written after insert.
pub const UPDATE_BILL: &str = "UPDATE bills SET embasa = $1, coelba = $2, updated_at = NOW() \
     WHERE id = $3 RETURNING created_at, updated_at";
pub const DELETE_BILL: &str = "DELETE FROM bills WHERE id = $1";
