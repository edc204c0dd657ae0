#[cfg(test)]
mod fields;
#[cfg(test)]
mod methods;
#[cfg(test)]
mod scan;
#[cfg(test)]
mod time;
