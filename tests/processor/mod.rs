mod tests_batch;
mod tests_inheritance;
