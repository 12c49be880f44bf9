mod merge_args_tests;
