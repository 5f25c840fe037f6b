//! Demo dataset: the fixture records the stores are seeded with.
//!
//! Ids are generated at build time and cross-linked (client ↔ invoice ↔
//! product references), since there is no persistence to reload them from.

use chrono::{DateTime, TimeZone, Utc};

use smilodon_clients::{
    Client, ClientId, ClientTransaction, TransactionId, TransactionKind,
};
use smilodon_invoicing::{Invoice, InvoiceId, InvoiceItem, InvoiceStatus};
use smilodon_products::{Product, ProductDraft, ProductId};
use smilodon_store::Record;
use smilodon_users::{User, UserDraft, UserId, UserRole, UserStatus};

/// The full cross-linked fixture set.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub clients: Vec<Client>,
    pub transactions: Vec<ClientTransaction>,
    pub products: Vec<Product>,
    pub invoices: Vec<Invoice>,
    pub users: Vec<User>,
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0).unwrap()
}

/// Build the demo dataset.
pub fn demo_data() -> DemoData {
    // Products first; invoices snapshot them.
    let laptop = Product::hydrate(
        ProductId::new(),
        date(2024, 1, 10),
        ProductDraft {
            name: "Laptop Dell Inspiron".to_string(),
            description: "Laptop para uso empresarial com 8GB RAM e 256GB SSD".to_string(),
            price: 120_000,
            category: "Informática".to_string(),
            stock: 15,
            active: true,
        },
    );
    let monitor = Product::hydrate(
        ProductId::new(),
        date(2024, 1, 12),
        ProductDraft {
            name: "Monitor Samsung 24\"".to_string(),
            description: "Monitor Full HD para escritório".to_string(),
            price: 35_000,
            category: "Informática".to_string(),
            stock: 25,
            active: true,
        },
    );
    let desk = Product::hydrate(
        ProductId::new(),
        date(2024, 1, 15),
        ProductDraft {
            name: "Mesa de Escritório".to_string(),
            description: "Mesa executiva em madeira premium".to_string(),
            price: 85_000,
            category: "Mobiliário".to_string(),
            stock: 8,
            active: true,
        },
    );
    let chair = Product::hydrate(
        ProductId::new(),
        date(2024, 1, 18),
        ProductDraft {
            name: "Cadeira Ergonómica".to_string(),
            description: "Cadeira de escritório com apoio lombar".to_string(),
            price: 45_000,
            category: "Mobiliário".to_string(),
            stock: 12,
            active: true,
        },
    );

    let joao_id = ClientId::new();
    let maria_id = ClientId::new();
    let smd_001_id = InvoiceId::new();
    let smd_002_id = InvoiceId::new();

    let invoices = vec![
        Invoice {
            id: smd_001_id,
            number: "SMD-001".to_string(),
            client_id: joao_id,
            client_name: "João Silva".to_string(),
            items: vec![InvoiceItem {
                product_id: laptop.id,
                product_name: laptop.name.clone(),
                quantity: 1,
                unit_price: 120_000,
                total: 120_000,
            }],
            subtotal: 120_000,
            tax: 21_600,
            total: 141_600,
            status: InvoiceStatus::Paid,
            issue_date: date(2024, 1, 20),
            due_date: date(2024, 2, 20),
            paid_date: Some(date(2024, 1, 25)),
        },
        Invoice {
            id: smd_002_id,
            number: "SMD-002".to_string(),
            client_id: maria_id,
            client_name: "Maria Santos".to_string(),
            items: vec![
                InvoiceItem {
                    product_id: monitor.id,
                    product_name: monitor.name.clone(),
                    quantity: 2,
                    unit_price: 35_000,
                    total: 70_000,
                },
                InvoiceItem {
                    product_id: chair.id,
                    product_name: chair.name.clone(),
                    quantity: 1,
                    unit_price: 45_000,
                    total: 45_000,
                },
            ],
            subtotal: 115_000,
            tax: 20_700,
            total: 135_700,
            status: InvoiceStatus::Sent,
            issue_date: date(2024, 2, 1),
            due_date: date(2024, 3, 1),
            paid_date: None,
        },
    ];

    let clients = vec![
        Client {
            id: joao_id,
            name: "João Silva".to_string(),
            email: "joao@example.com".to_string(),
            phone: "+244 923 456 789".to_string(),
            address: "Rua da Independência, 123, Luanda".to_string(),
            tax_number: Some("123456789".to_string()),
            balance: 0,
            credit_limit: 50_000,
            invoices: vec![smd_001_id.0],
            created_at: date(2024, 1, 15),
        },
        Client {
            id: maria_id,
            name: "Maria Santos".to_string(),
            email: "maria@example.com".to_string(),
            phone: "+244 924 567 890".to_string(),
            address: "Avenida Marginal, 456, Luanda".to_string(),
            tax_number: Some("987654321".to_string()),
            balance: -15_000,
            credit_limit: 75_000,
            invoices: vec![smd_002_id.0],
            created_at: date(2024, 2, 20),
        },
    ];

    // João's history: billed for SMD-001, then settled it.
    let transactions = vec![
        ClientTransaction {
            id: TransactionId::new(),
            client_id: joao_id,
            kind: TransactionKind::Debit,
            amount: 25_000,
            description: "Fatura #001 - Produtos diversos".to_string(),
            invoice_id: Some(smd_001_id.0),
            occurred_at: date(2024, 1, 20),
        },
        ClientTransaction {
            id: TransactionId::new(),
            client_id: joao_id,
            kind: TransactionKind::Credit,
            amount: 25_000,
            description: "Pagamento fatura #001".to_string(),
            invoice_id: None,
            occurred_at: date(2024, 1, 25),
        },
    ];

    let mut users = vec![
        User::hydrate(
            UserId::new(),
            date(2024, 1, 1),
            UserDraft {
                name: "João Silva".to_string(),
                email: "joao@smilodon.com".to_string(),
                role: UserRole::Admin,
                department: "TI".to_string(),
                phone: "+244 923 456 789".to_string(),
                status: UserStatus::Active,
            },
        ),
        User::hydrate(
            UserId::new(),
            date(2024, 1, 5),
            UserDraft {
                name: "Maria Santos".to_string(),
                email: "maria@smilodon.com".to_string(),
                role: UserRole::Manager,
                department: "Vendas".to_string(),
                phone: "+244 924 567 890".to_string(),
                status: UserStatus::Active,
            },
        ),
        User::hydrate(
            UserId::new(),
            date(2024, 1, 10),
            UserDraft {
                name: "Pedro Costa".to_string(),
                email: "pedro@smilodon.com".to_string(),
                role: UserRole::User,
                department: "Financeiro".to_string(),
                phone: "+244 925 678 901".to_string(),
                status: UserStatus::Inactive,
            },
        ),
    ];
    users[0].last_login = datetime(2024, 1, 15, 10, 30);
    users[1].last_login = datetime(2024, 1, 14, 15, 45);
    users[2].last_login = datetime(2024, 1, 10, 9, 15);

    DemoData {
        clients,
        transactions,
        products: vec![laptop, monitor, desk, chair],
        invoices,
        users,
    }
}
