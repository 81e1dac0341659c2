use errata::{ErrorDomain, ErrorRecord, error_domain};

#[error_domain("payments")]
struct Payments;

#[error_domain("payments.card-v2")]
pub struct Cards;

fn main() {
    const _: () = assert!(errata::domain::is_valid_domain(Cards::DOMAIN));

    let record = ErrorRecord::<Payments>::new("Card declined");
    assert_eq!(record.to_string(), "[payments.generic-000] Card declined");
    assert_eq!(ErrorRecord::<Cards>::DOMAIN, "payments.card-v2");
}
