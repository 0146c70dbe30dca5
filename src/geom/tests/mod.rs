mod test_distribution_basic;
mod test_edge_map_basic;
mod test_interpolate_basic;
