pub mod donation;

pub use donation::{
    CreateOrderResponse, DonationRequest, ExecutePaymentRequest, ExecutePaymentResponse,
    PaymentIntentResponse, ValidatedAmount,
};
