mod buffer_tests;
