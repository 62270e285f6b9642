use reqwest::Client;
use std::future::Future;
use tracing::{debug, error};

use crate::config::ApiParams;
use crate::error::ParkResult;
use crate::model::{BookingRequest, BookingResponse, Reservation, SpotRecord};

/// The backend as seen by the UI. One request per call, no retries.
pub trait ParkingApi {
    fn fetch_spots(&self) -> impl Future<Output = ParkResult<Vec<SpotRecord>>> + Send;

    fn book_spot(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = ParkResult<BookingResponse>> + Send;

    fn fetch_reservations(&self) -> impl Future<Output = ParkResult<Vec<Reservation>>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpParkingApi {
    client: Client,
    base_url: String,
}

impl HttpParkingApi {
    pub fn new(params: &ApiParams) -> ParkResult<Self> {
        let client = Client::builder().timeout(params.timeout()).build()?;
        Ok(Self {
            client,
            base_url: params.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ParkingApi for HttpParkingApi {
    async fn fetch_spots(&self) -> ParkResult<Vec<SpotRecord>> {
        let url = self.url("/parking-spots");
        debug!("GET {}", url);
        let result: ParkResult<Vec<SpotRecord>> = async {
            let resp = self.client.get(&url).send().await?.error_for_status()?;
            // A `null` body is treated as an empty lot.
            let spots: Option<Vec<SpotRecord>> = resp.json().await?;
            Ok(spots.unwrap_or_default())
        }
        .await;
        if let Err(e) = &result {
            error!("Error fetching parking spots: {}", e);
        }
        result
    }

    async fn book_spot(&self, request: &BookingRequest) -> ParkResult<BookingResponse> {
        let url = self.url("/book-spot");
        debug!("POST {} for spot {}", url, request.spot_id);
        let result: ParkResult<BookingResponse> = async {
            let resp = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await?
                .error_for_status()?;
            Ok(resp.json().await?)
        }
        .await;
        if let Err(e) = &result {
            error!("Error booking parking spot: {}", e);
        }
        result
    }

    async fn fetch_reservations(&self) -> ParkResult<Vec<Reservation>> {
        let url = self.url("/reservations");
        debug!("GET {}", url);
        let result: ParkResult<Vec<Reservation>> = async {
            let resp = self.client.get(&url).send().await?.error_for_status()?;
            let rows: Option<Vec<Reservation>> = resp.json().await?;
            Ok(rows.unwrap_or_default())
        }
        .await;
        if let Err(e) = &result {
            error!("Error fetching reservations: {}", e);
        }
        result
    }
}
