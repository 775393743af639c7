use serde::{Deserialize, Serialize};

use crate::clients::yelp::YelpBusiness;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&YelpBusiness> for Shop {
    fn from(business: &YelpBusiness) -> Self {
        Self {
            name: business.name.clone(),
            image_url: business.image_url.clone(),
            price: business.price.clone(),
            rating: business.rating,
            url: business.url.clone(),
        }
    }
}
