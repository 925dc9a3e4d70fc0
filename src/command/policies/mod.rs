pub mod flag_policy;
#[cfg(test)]
mod tests;
