use sea_orm::DatabaseConnection;

use crate::ResultEngine;

mod access;
mod accounts;
mod adjustments;
mod admin;
mod batches;
mod companies;
mod footsteps;
mod ledger;
mod member_profiles;
mod payment_types;
mod remittances;
mod user_ratings;
mod vouchers;

pub use adjustments::AdjustmentEntryInput;
pub use ledger::LedgerFilter;
pub use member_profiles::MemberProfileInput;
pub use remittances::{RemittanceInput, RemittanceKind};
pub use vouchers::VoucherEntryInput;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
