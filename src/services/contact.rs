//! 联系方式抽取 - 业务能力层

use crate::models::candidate::ContactDetails;
use crate::services::patterns::{EMAIL, PHONE};

/// 抽取邮箱与电话，两者各自独立回退
pub fn extract_contact(text: &str) -> ContactDetails {
    ContactDetails {
        email: EMAIL.find(text),
        phone: PHONE.find(text),
    }
}
