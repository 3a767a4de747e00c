//! Seed the role reference table
//!
//! The three canonical roles must exist before any sign-up can
//! resolve them; a missing row surfaces later as a RoleNotFound
//! configuration error.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_roles::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["ROLE_ADMIN", "ROLE_DOCTOR", "ROLE_PATIENT"] {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Roles::Table)
                        .columns([Roles::Name])
                        .values_panic([name.into()])
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(Roles::Table).to_owned())
            .await
    }
}
