/// One table of the application schema.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    /// Tables this one holds foreign keys to. All of them come earlier in [`TABLES`].
    pub references: &'static [&'static str],
    pub ddl: &'static str,
}

/// The application schema in foreign-key dependency order.
/// Every statement is create-if-absent, so re-applying the list is a no-op.
pub const TABLES: [TableDef; 5] = [
    // --- Company ---
    TableDef {
        name: "COMPANY",
        references: &[],
        ddl: r#"CREATE TABLE IF NOT EXISTS COMPANY (
            COMPANY_ID UUID PRIMARY KEY,
            OWNER_ID   VARCHAR(255),
            NAME       VARCHAR(255),
            ADDRESS    VARCHAR(255),
            ADDRESS2   VARCHAR(255),
            CITY       VARCHAR(255),
            STATE      VARCHAR(255),
            COUNTRY    VARCHAR(255),
            ZIPCODE    VARCHAR(255)
        )"#,
    },
    // --- Users ---
    TableDef {
        name: "USERS",
        references: &["COMPANY"],
        ddl: r#"CREATE TABLE IF NOT EXISTS USERS (
            USER_ID        UUID PRIMARY KEY,
            COMPANY_ID     UUID REFERENCES COMPANY(COMPANY_ID),
            USER_NAME      VARCHAR(255),
            SOURCE_USER_ID VARCHAR(255),
            IS_ACTIVE      BOOLEAN,
            IS_MANAGER     BOOLEAN,
            VIEW_PRICING   BOOLEAN,
            PHONE_NUMBER   VARCHAR(255)
        )"#,
    },
    // --- Client ---
    TableDef {
        name: "CLIENT",
        references: &["COMPANY"],
        ddl: r#"CREATE TABLE IF NOT EXISTS CLIENT (
            CLIENT_ID          UUID PRIMARY KEY,
            COMPANY_ID         UUID REFERENCES COMPANY(COMPANY_ID),
            FIRST_NAME         VARCHAR(255),
            LAST_NAME          VARCHAR(255),
            CLIENT_SINCE       DATE,
            IS_ACTIVE          BOOLEAN,
            CLIENT_CREATE_DATE DATE,
            SOURCE_CLIENT_ID   VARCHAR(255)
        )"#,
    },
    // --- Tax codes ---
    TableDef {
        name: "TAX_CODE",
        references: &["COMPANY"],
        ddl: r#"CREATE TABLE IF NOT EXISTS TAX_CODE (
            TAX_CODE_ID          UUID PRIMARY KEY,
            COMPANY_ID           UUID REFERENCES COMPANY(COMPANY_ID),
            TAX_CODE_NAME        VARCHAR(255),
            TAX_CODE_DESCRIPTION VARCHAR(255),
            TAX_CODE_RATE        DECIMAL(10, 2),
            IS_TAXABLE           BOOLEAN
        )"#,
    },
    // --- Sites ---
    TableDef {
        name: "SITE",
        references: &["COMPANY", "CLIENT", "TAX_CODE"],
        ddl: r#"CREATE TABLE IF NOT EXISTS SITE (
            SITE_ID          UUID PRIMARY KEY,
            COMPANY_ID       UUID REFERENCES COMPANY(COMPANY_ID),
            CLIENT_ID        UUID REFERENCES CLIENT(CLIENT_ID),
            TAX_CODE_ID      UUID REFERENCES TAX_CODE(TAX_CODE_ID),
            ADDRESS          VARCHAR(255),
            ADDRESS2         VARCHAR(255),
            CITY             VARCHAR(255),
            STATE            VARCHAR(255),
            COUNTRY          VARCHAR(255),
            ZIPCODE          VARCHAR(255),
            NOTES            TEXT,
            SECURITY_NOTES   TEXT,
            OFFICE_ALERT     TEXT,
            COORDINATES      VARCHAR(255),
            TECHNICIAN_NOTES TEXT
        )"#,
    },
];

/// Schema tables absent from `existing` (names as reported by the catalog, any case).
pub fn missing_from<S: AsRef<str>>(existing: &[S]) -> Vec<&'static str> {
    TABLES
        .iter()
        .map(|t| t.name)
        .filter(|name| {
            !existing
                .iter()
                .any(|e| e.as_ref().eq_ignore_ascii_case(name))
        })
        .collect()
}
