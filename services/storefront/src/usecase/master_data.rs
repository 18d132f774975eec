//! Generic administration of brands, categories, genders and product types.
//!
//! One form type serves all four tables; the record type parameter picks the
//! endpoint and request body. Deleting a record that products still reference
//! is not checked here.

use rincon_domain::master_data::{
    Brand, Category, Gender, MasterDataForm, MasterDataKind, MasterRecord, ProductType,
};

use crate::domain::repository::MasterDataRepository;
use crate::domain::types::MasterData;
use crate::error::StorefrontError;

// ── LoadMasterData ───────────────────────────────────────────────────────────

pub struct LoadMasterDataUseCase<M: MasterDataRepository> {
    pub master: M,
}

impl<M: MasterDataRepository> LoadMasterDataUseCase<M> {
    pub async fn execute(&self) -> MasterData {
        let (brands, categories, genders, product_types) = tokio::join!(
            self.master.list::<Brand>(),
            self.master.list::<Category>(),
            self.master.list::<Gender>(),
            self.master.list::<ProductType>(),
        );
        MasterData {
            brands: or_empty::<Brand>(brands),
            categories: or_empty::<Category>(categories),
            genders: or_empty::<Gender>(genders),
            product_types: or_empty::<ProductType>(product_types),
        }
    }
}

fn or_empty<T: MasterRecord>(result: Result<Vec<T>, StorefrontError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(kind = %T::KIND, error = %e, "master data list unavailable");
        Vec::new()
    })
}

// ── CreateMasterRecord ───────────────────────────────────────────────────────

pub struct CreateMasterRecordUseCase<M: MasterDataRepository> {
    pub master: M,
}

impl<M: MasterDataRepository> CreateMasterRecordUseCase<M> {
    pub async fn execute<T: MasterRecord>(
        &self,
        form: &MasterDataForm,
    ) -> Result<T, StorefrontError> {
        form.validate(T::KIND)?;
        let created: T = self.master.create::<T>(&T::request_from_form(form)).await?;
        tracing::info!(
            kind = %T::KIND,
            key = created.key(),
            name = created.name(),
            "record created"
        );
        Ok(created)
    }
}

// ── UpdateMasterRecord ───────────────────────────────────────────────────────

pub struct UpdateMasterRecordUseCase<M: MasterDataRepository> {
    pub master: M,
}

impl<M: MasterDataRepository> UpdateMasterRecordUseCase<M> {
    pub async fn execute<T: MasterRecord>(
        &self,
        key: i64,
        form: &MasterDataForm,
    ) -> Result<T, StorefrontError> {
        form.validate(T::KIND)?;
        let updated: T = self
            .master
            .update::<T>(key, &T::request_from_form(form))
            .await?;
        tracing::info!(kind = %T::KIND, key, "record updated");
        Ok(updated)
    }
}

// ── DeleteMasterRecord ───────────────────────────────────────────────────────

pub struct DeleteMasterRecordUseCase<M: MasterDataRepository> {
    pub master: M,
}

impl<M: MasterDataRepository> DeleteMasterRecordUseCase<M> {
    pub async fn execute(&self, kind: MasterDataKind, key: i64) -> Result<(), StorefrontError> {
        self.master.delete(kind, key).await?;
        tracing::info!(%kind, key, "record deleted");
        Ok(())
    }
}
