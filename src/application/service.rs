use chrono::Utc;

use crate::domain::{Cents, Company, CompanyId, Product, ProductId, TypeId, TypeProdService};
use crate::storage::Repository;

use super::{AppError, Identity};

/// Application service providing the ERP operations. This is the primary
/// interface for any client (REST boundary, CLI, TUI); every operation takes
/// a verified [`Identity`].
pub struct ErpService {
    repo: Repository,
}

/// Input for registering a company.
#[derive(Debug, Clone, Default)]
pub struct NewCompany {
    pub name: String,
    pub employees: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Input for registering a product. Numeric fields default to zero and text
/// fields to empty, matching the registration form.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub product_type: String,
    pub company_id: CompanyId,
    pub amount: i64,
    pub min_amount: i64,
    pub stock_enabled: bool,
    pub cost_value: Cents,
    pub supplier: String,
    pub internal_cod: String,
    pub barcode: String,
    pub observation: String,
}

/// Partial product update: only the provided fields change.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub amount: Option<i64>,
    pub min_amount: Option<i64>,
    pub stock_enabled: Option<bool>,
    pub cost_value: Option<Cents>,
    pub supplier: Option<String>,
    pub internal_cod: Option<String>,
    pub barcode: Option<String>,
    pub observation: Option<String>,
}

impl ErpService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    pub(crate) fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Fetch a company and enforce that the caller owns it.
    pub(crate) async fn owned_company(
        &self,
        identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Company, AppError> {
        let company = self
            .repo
            .get_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(company_id))?;
        if !company.is_owned_by(identity.user_id) {
            return Err(AppError::Forbidden(
                "Empresa não pertence ao usuário".to_string(),
            ));
        }
        Ok(company)
    }

    // ========================
    // Company operations
    // ========================

    /// Register a company for the calling user, with zeroed revenue
    /// aggregates.
    pub async fn create_company(
        &self,
        identity: &Identity,
        input: NewCompany,
    ) -> Result<Company, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::ValidationFailed("name".to_string()));
        }

        // Company names are unique across tenants.
        if self.repo.get_company_by_name(&input.name).await?.is_some() {
            return Err(AppError::CompanyAlreadyExists(input.name));
        }

        let company = Company::new(input.name, identity.user_id).with_profile(
            input.employees,
            input.location,
            input.email,
            input.phone,
            input.address,
        );
        self.repo.save_company(&company).await?;
        Ok(company)
    }

    /// List the calling user's companies.
    pub async fn list_companies(&self, identity: &Identity) -> Result<Vec<Company>, AppError> {
        Ok(self.repo.list_companies_for_user(identity.user_id).await?)
    }

    /// Get a company by id. Lookup is not ownership-gated; destructive
    /// operations are.
    pub async fn get_company(
        &self,
        _identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Company, AppError> {
        self.repo
            .get_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(company_id))
    }

    /// Delete a company and everything that cascades with it. Owner only.
    pub async fn delete_company(
        &self,
        identity: &Identity,
        company_id: CompanyId,
    ) -> Result<(), AppError> {
        let company = self
            .repo
            .get_company(company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(company_id))?;
        if !company.is_owned_by(identity.user_id) {
            return Err(AppError::Forbidden(
                "Você não tem permissão para deletar esta empresa".to_string(),
            ));
        }
        self.repo.delete_company(company_id).await?;
        Ok(())
    }

    // ========================
    // Product operations
    // ========================

    /// Register a product in one of the caller's companies. Name and type
    /// are required; the name must be unique within the company.
    pub async fn create_product(
        &self,
        identity: &Identity,
        input: NewProduct,
    ) -> Result<Product, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::ValidationFailed("name".to_string()));
        }
        if input.product_type.trim().is_empty() {
            return Err(AppError::ValidationFailed("type".to_string()));
        }

        self.owned_company(identity, input.company_id).await?;

        if self
            .repo
            .get_product_by_name(input.company_id, &input.name)
            .await?
            .is_some()
        {
            return Err(AppError::ProductAlreadyExists(input.name));
        }

        let mut product = Product::new(input.name, input.product_type, input.company_id);
        product.amount = input.amount;
        product.min_amount = input.min_amount;
        product.stock_enabled = input.stock_enabled;
        product.cost_value = input.cost_value;
        product.supplier = input.supplier;
        product.internal_cod = input.internal_cod;
        product.barcode = input.barcode;
        product.observation = input.observation;

        self.repo.save_product(&product).await?;
        Ok(product)
    }

    /// List a company's products. Owner only.
    pub async fn list_products(
        &self,
        identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Vec<Product>, AppError> {
        self.owned_company(identity, company_id).await?;
        Ok(self.repo.list_products(company_id).await?)
    }

    /// Get a product, enforcing that its company belongs to the caller.
    pub async fn get_product(
        &self,
        identity: &Identity,
        product_id: ProductId,
    ) -> Result<Product, AppError> {
        let product = self
            .repo
            .get_product(product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;
        self.product_owned_guard(identity, &product).await?;
        Ok(product)
    }

    /// Merge the provided fields into a product.
    pub async fn update_product(
        &self,
        identity: &Identity,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, AppError> {
        let mut product = self
            .repo
            .get_product(product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;
        self.product_owned_guard(identity, &product).await?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(product_type) = update.product_type {
            product.product_type = product_type;
        }
        if let Some(amount) = update.amount {
            product.amount = amount;
        }
        if let Some(min_amount) = update.min_amount {
            product.min_amount = min_amount;
        }
        if let Some(stock_enabled) = update.stock_enabled {
            product.stock_enabled = stock_enabled;
        }
        if let Some(cost_value) = update.cost_value {
            product.cost_value = cost_value;
        }
        if let Some(supplier) = update.supplier {
            product.supplier = supplier;
        }
        if let Some(internal_cod) = update.internal_cod {
            product.internal_cod = internal_cod;
        }
        if let Some(barcode) = update.barcode {
            product.barcode = barcode;
        }
        if let Some(observation) = update.observation {
            product.observation = observation;
        }
        product.updated_at = Utc::now();

        self.repo.update_product(&product).await?;
        Ok(product)
    }

    /// Delete a product. Its ledger entries cascade with it.
    pub async fn delete_product(
        &self,
        identity: &Identity,
        product_id: ProductId,
    ) -> Result<(), AppError> {
        let product = self
            .repo
            .get_product(product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;
        self.product_owned_guard(identity, &product).await?;
        self.repo.delete_product(product_id).await?;
        Ok(())
    }

    async fn product_owned_guard(
        &self,
        identity: &Identity,
        product: &Product,
    ) -> Result<(), AppError> {
        let company = self
            .repo
            .get_company(product.company_id)
            .await?
            .ok_or(AppError::CompanyNotFound(product.company_id))?;
        if !company.is_owned_by(identity.user_id) {
            return Err(AppError::Forbidden(
                "Produto não pertence ao usuário".to_string(),
            ));
        }
        Ok(())
    }

    // ========================
    // Type operations
    // ========================

    /// Register a product/service type for one of the caller's companies.
    pub async fn create_type(
        &self,
        identity: &Identity,
        company_id: CompanyId,
        name: String,
    ) -> Result<TypeProdService, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationFailed("name".to_string()));
        }
        self.owned_company(identity, company_id).await?;

        let type_prod_service = TypeProdService::new(name, company_id);
        self.repo.save_type(&type_prod_service).await?;
        Ok(type_prod_service)
    }

    pub async fn list_types(
        &self,
        identity: &Identity,
        company_id: CompanyId,
    ) -> Result<Vec<TypeProdService>, AppError> {
        self.owned_company(identity, company_id).await?;
        Ok(self.repo.list_types(company_id).await?)
    }

    pub async fn get_type(
        &self,
        _identity: &Identity,
        type_id: TypeId,
    ) -> Result<TypeProdService, AppError> {
        self.repo
            .get_type(type_id)
            .await?
            .ok_or(AppError::TypeNotFound(type_id))
    }

    pub async fn update_type(
        &self,
        identity: &Identity,
        type_id: TypeId,
        name: String,
    ) -> Result<TypeProdService, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationFailed("name".to_string()));
        }
        let mut type_prod_service = self
            .repo
            .get_type(type_id)
            .await?
            .ok_or(AppError::TypeNotFound(type_id))?;
        self.owned_company(identity, type_prod_service.company_id)
            .await?;

        type_prod_service.name = name;
        type_prod_service.updated_at = Utc::now();
        self.repo.update_type(&type_prod_service).await?;
        Ok(type_prod_service)
    }

    pub async fn delete_type(
        &self,
        identity: &Identity,
        type_id: TypeId,
    ) -> Result<(), AppError> {
        let type_prod_service = self
            .repo
            .get_type(type_id)
            .await?
            .ok_or(AppError::TypeNotFound(type_id))?;
        self.owned_company(identity, type_prod_service.company_id)
            .await?;
        self.repo.delete_type(type_id).await?;
        Ok(())
    }
}
