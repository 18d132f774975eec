use chrono::{Local, NaiveDate};

use rincon_domain::customer::{Customer, CustomerRequest};
use rincon_domain::order::DEFAULT_REGION;
use rincon_domain::user::{Role, User};
use rincon_domain::validation::{
    ValidationError, non_blank, require_non_blank, validate_birth_date, validate_email,
    validate_password, validate_rut,
};

use crate::domain::repository::CustomerRepository;
use crate::error::StorefrontError;

/// Self-registration form. Optional fields may be left blank.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub rut: String,
    pub first_name: String,
    pub second_name: String,
    pub first_surname: String,
    pub second_surname: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub phone: String,
    pub address: String,
    pub commune: String,
    /// Blank means [`DEFAULT_REGION`].
    pub region: String,
}

impl RegistrationForm {
    /// Checks run in the order the form shows its errors; the first failure
    /// wins.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        for (field, value) in [
            ("rut", &self.rut),
            ("first_name", &self.first_name),
            ("first_surname", &self.first_surname),
            ("email", &self.email),
            ("password", &self.password),
            ("birth_date", &self.birth_date),
            ("phone", &self.phone),
            ("address", &self.address),
            ("commune", &self.commune),
        ] {
            require_non_blank(field, value)?;
        }
        if !validate_rut(self.rut.trim()) {
            return Err(ValidationError::InvalidRut);
        }
        if !validate_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        validate_password(&self.password, &self.password_confirmation)?;
        validate_birth_date(&self.birth_date, today)?;
        Ok(())
    }

    fn into_request(self) -> CustomerRequest {
        let region =
            non_blank(Some(self.region.as_str())).unwrap_or_else(|| DEFAULT_REGION.to_owned());
        let first_name = self.first_name.trim().to_owned();
        let first_surname = self.first_surname.trim().to_owned();
        CustomerRequest {
            user: User {
                name: first_name.clone(),
                surname: first_surname.clone(),
                email: self.email.trim().to_owned(),
                password: self.password,
                active: true,
                roles: vec![Role::customer()],
                ..Default::default()
            },
            rut: self.rut.trim().to_owned(),
            first_name,
            second_name: non_blank(Some(self.second_name.as_str())),
            first_surname,
            second_surname: non_blank(Some(self.second_surname.as_str())),
            birth_date: self.birth_date.trim().to_owned(),
            address: self.address.trim().to_owned(),
            commune: self.commune.trim().to_owned(),
            region,
            phone: self.phone.trim().to_owned(),
        }
    }
}

/// Creates a customer profile together with its login account.
pub struct RegisterCustomerUseCase<C: CustomerRepository> {
    pub customers: C,
}

impl<C: CustomerRepository> RegisterCustomerUseCase<C> {
    pub async fn execute(&self, form: RegistrationForm) -> Result<Customer, StorefrontError> {
        self.execute_on(form, Local::now().date_naive()).await
    }

    /// Same as [`execute`](Self::execute) with an explicit date for the age check.
    pub async fn execute_on(
        &self,
        form: RegistrationForm,
        today: NaiveDate,
    ) -> Result<Customer, StorefrontError> {
        form.validate(today)?;
        let customer = self.customers.create(&form.into_request()).await?;
        tracing::info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }
}
