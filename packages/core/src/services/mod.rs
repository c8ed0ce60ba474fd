pub mod shortages;

#[cfg(test)]
pub mod mock_shortages;
