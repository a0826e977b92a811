//! Catalog of remote operations.
//!
//! One variant per provider method, mapped to its wire path by
//! [`Operation::path`]. The HTTP client consumes this table through a single
//! generic dispatch function; operation-specific behavior (validation,
//! redirect URL enrichment) is layered on top in the client, not here.

use std::fmt;

/// A named remote method of the Adaptive Payments / Adaptive Accounts APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // AdaptivePayments
    /// Transfer money between accounts.
    Pay,
    /// Fetch the state of a previously created payment.
    PaymentDetails,
    /// Fetch the display options of a payment.
    GetPaymentOptions,
    /// Customize a payment's checkout flow.
    SetPaymentOptions,
    /// Refund all or part of a payment.
    Refund,
    /// Set up an agreement for future payments.
    Preapproval,
    /// Fetch the state of a preapproval agreement.
    PreapprovalDetails,
    /// Cancel a preapproval agreement.
    CancelPreapproval,
    /// Estimate currency conversion.
    ConvertCurrency,
    /// Execute a payment created with `actionType=CREATE`.
    ExecutePayment,
    /// Fetch the funding sources available for a payment.
    GetFundingPlans,
    /// Fetch the sender's shipping addresses.
    GetShippingAddresses,

    // AdaptiveAccounts
    /// Link a bank account to an account.
    AddBankAccount,
    /// Link a payment card to an account.
    AddPaymentCard,
    /// Check an account holder's compliance status.
    CheckComplianceStatus,
    /// Update an account holder's compliance status.
    UpdateComplianceStatus,
    /// Create a new account.
    CreateAccount,
    /// Fetch the user agreement for account creation.
    GetUserAgreement,
    /// Check whether an account is verified.
    GetVerifiedStatus,
    /// Confirm a funding source for an account.
    SetFundingSourceConfirmed,
}

impl Operation {
    /// The path this operation is POSTed to, relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Pay => "AdaptivePayments/Pay",
            Self::PaymentDetails => "AdaptivePayments/PaymentDetails",
            Self::GetPaymentOptions => "AdaptivePayments/GetPaymentOptions",
            Self::SetPaymentOptions => "AdaptivePayments/SetPaymentOptions",
            Self::Refund => "AdaptivePayments/Refund",
            Self::Preapproval => "AdaptivePayments/Preapproval",
            Self::PreapprovalDetails => "AdaptivePayments/PreapprovalDetails",
            Self::CancelPreapproval => "AdaptivePayments/CancelPreapproval",
            Self::ConvertCurrency => "AdaptivePayments/ConvertCurrency",
            Self::ExecutePayment => "AdaptivePayments/ExecutePayment",
            Self::GetFundingPlans => "AdaptivePayments/GetFundingPlans",
            Self::GetShippingAddresses => "AdaptivePayments/GetShippingAddresses",
            Self::AddBankAccount => "AdaptiveAccounts/AddBankAccount",
            Self::AddPaymentCard => "AdaptiveAccounts/AddPaymentCard",
            Self::CheckComplianceStatus => "AdaptiveAccounts/CheckComplianceStatus",
            Self::UpdateComplianceStatus => "AdaptiveAccounts/UpdateComplianceStatus",
            Self::CreateAccount => "AdaptiveAccounts/CreateAccount",
            Self::GetUserAgreement => "AdaptiveAccounts/GetUserAgreement",
            Self::GetVerifiedStatus => "AdaptiveAccounts/GetVerifiedStatus",
            Self::SetFundingSourceConfirmed => "AdaptiveAccounts/SetFundingSourceConfirmed",
        }
    }

    /// The bare method name, without its namespace.
    #[must_use]
    pub fn name(self) -> &'static str {
        // path is always "Namespace/Name"
        match self.path().split_once('/') {
            Some((_, name)) => name,
            None => self.path(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
